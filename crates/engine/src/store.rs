//! The record store: the canonical, ordered list of shopping records.
//!
//! Every mutation rewrites the whole collection and returns it, so callers
//! always hold the full resulting list (full-replace contract).

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::{BlobStore, EngineError, Price, RecordDraft, ResultEngine, ShoppingRecord};

/// Key the collection is stored under.
pub const STORAGE_KEY: &str = "smart_shop_items_v1";

/// Returns a fresh record id.
///
/// UUIDv7: a millisecond timestamp followed by random bits. Uniqueness is
/// practical, not checked.
#[must_use]
pub fn new_id() -> String {
    Uuid::now_v7().simple().to_string()
}

#[derive(Debug)]
pub struct RecordStore<B> {
    blob: B,
    key: String,
}

impl<B: BlobStore> RecordStore<B> {
    pub fn new(blob: B) -> Self {
        Self {
            blob,
            key: STORAGE_KEY.to_string(),
        }
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// Full collection in storage order.
    ///
    /// Fails open: a missing, unreadable or corrupt blob yields an empty list.
    pub fn list_all(&self) -> Vec<ShoppingRecord> {
        let raw = match self.blob.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read records: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("failed to parse records, starting empty: {err}");
                Vec::new()
            }
        }
    }

    /// Looks a record up by id.
    pub fn get(&self, id: &str) -> Option<ShoppingRecord> {
        self.list_all().into_iter().find(|record| record.id == id)
    }

    /// Replaces the record with the same id in place, or prepends it.
    ///
    /// The stored `created_at` of an existing record always wins and the
    /// discount is re-derived before writing. The returned collection is
    /// exactly what a later [`list_all`](Self::list_all) reads back.
    pub fn upsert(&mut self, mut record: ShoppingRecord) -> ResultEngine<Vec<ShoppingRecord>> {
        for price in [record.list_price, record.actual_price, record.unit_cost] {
            if price > Price::MAX {
                return Err(EngineError::InvalidAmount("amount too large".to_string()));
            }
        }
        // Stored as epoch milliseconds.
        record.created_at = record.created_at.trunc_subsecs(3);
        record.refresh_discount();
        let mut records = self.list_all();
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                record.created_at = existing.created_at;
                *existing = record;
            }
            None => records.insert(0, record),
        }
        self.write(&records)?;
        Ok(records)
    }

    /// Drops the record with `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> ResultEngine<Vec<ShoppingRecord>> {
        let mut records = self.list_all();
        records.retain(|record| record.id != id);
        self.write(&records)?;
        Ok(records)
    }

    /// Validates `draft` and stores it as a new record with a fresh id.
    ///
    /// The new record is first in the returned collection.
    pub fn create(
        &mut self,
        draft: RecordDraft,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<ShoppingRecord>> {
        draft.validate()?;
        let record = ShoppingRecord::from_draft(new_id(), now, draft);
        tracing::debug!(id = %record.id, "creating record");
        self.upsert(record)
    }

    /// Validates `draft` and replaces record `id`, keeping id and `created_at`.
    pub fn update(&mut self, id: &str, draft: RecordDraft) -> ResultEngine<Vec<ShoppingRecord>> {
        draft.validate()?;
        let existing = self
            .get(id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        let record = ShoppingRecord::from_draft(existing.id, existing.created_at, draft);
        tracing::debug!(id = %record.id, "updating record");
        self.upsert(record)
    }

    /// Deletes the whole persisted collection.
    pub fn clear(&mut self) -> ResultEngine<()> {
        self.blob.delete(&self.key)
    }

    fn write(&mut self, records: &[ShoppingRecord]) -> ResultEngine<()> {
        let payload = serde_json::to_string(records)?;
        self.blob.set(&self.key, &payload)?;
        tracing::debug!(count = records.len(), "records persisted");
        Ok(())
    }
}
