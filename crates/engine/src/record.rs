//! The shopping record, the only entity of the store.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, Price, RecordDraft};

/// Lifecycle state of a record. Statistics consider only [`Bought`].
///
/// [`Bought`]: PurchaseStatus::Bought
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    #[default]
    Planned,
    Bought,
}

impl PurchaseStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PurchaseStatus::Planned => "planned",
            PurchaseStatus::Bought => "bought",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PurchaseStatus::Planned => "待购买",
            PurchaseStatus::Bought => "已购买",
        }
    }
}

impl TryFrom<&str> for PurchaseStatus {
    type Error = crate::EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(PurchaseStatus::Planned),
            "bought" => Ok(PurchaseStatus::Bought),
            other => Err(crate::EngineError::InvalidValue(format!(
                "unknown status: {other}"
            ))),
        }
    }
}

/// How a bought item is being used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    #[default]
    New,
    InUse,
    Finished,
    Idle,
    Returned,
}

impl UsageStatus {
    pub const ALL: [UsageStatus; 5] = [
        UsageStatus::New,
        UsageStatus::InUse,
        UsageStatus::Finished,
        UsageStatus::Idle,
        UsageStatus::Returned,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UsageStatus::New => "new",
            UsageStatus::InUse => "in_use",
            UsageStatus::Finished => "finished",
            UsageStatus::Idle => "idle",
            UsageStatus::Returned => "returned",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            UsageStatus::New => "全新",
            UsageStatus::InUse => "使用中",
            UsageStatus::Finished => "已用完",
            UsageStatus::Idle => "闲置",
            UsageStatus::Returned => "已退货",
        }
    }
}

impl TryFrom<&str> for UsageStatus {
    type Error = crate::EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_ascii_lowercase().replace('-', "_");
        UsageStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| crate::EngineError::InvalidValue(format!("unknown usage status: {value}")))
    }
}

/// How `unit_cost` should be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCostType {
    #[default]
    PerItem,
    PerUse,
    PerDay,
    /// Per gram or millilitre.
    #[serde(rename = "per_gram")]
    PerUnitMass,
    Total,
}

impl UnitCostType {
    pub const ALL: [UnitCostType; 5] = [
        UnitCostType::PerItem,
        UnitCostType::PerUse,
        UnitCostType::PerDay,
        UnitCostType::PerUnitMass,
        UnitCostType::Total,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UnitCostType::PerItem => "per_item",
            UnitCostType::PerUse => "per_use",
            UnitCostType::PerDay => "per_day",
            UnitCostType::PerUnitMass => "per_gram",
            UnitCostType::Total => "total",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            UnitCostType::PerItem => "每件",
            UnitCostType::PerUse => "每次",
            UnitCostType::PerDay => "每天",
            UnitCostType::PerUnitMass => "每单位(g/ml)",
            UnitCostType::Total => "总计",
        }
    }
}

impl TryFrom<&str> for UnitCostType {
    type Error = crate::EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_ascii_lowercase().replace('-', "_");
        UnitCostType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| crate::EngineError::InvalidValue(format!("unknown unit cost type: {value}")))
    }
}

/// One purchase or planned purchase.
///
/// Persisted with camelCase keys; `createdAt` is stored as epoch
/// milliseconds. Fields other than `id`, `name`, `status`, `actualPrice` and
/// `createdAt` fall back to their zero/empty values when missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub status: PurchaseStatus,
    #[serde(default)]
    pub list_price: Price,
    pub actual_price: Price,
    #[serde(default)]
    pub discount_rate: f64,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub usage_status: UsageStatus,
    #[serde(default)]
    pub unit_cost_type: UnitCostType,
    #[serde(default)]
    pub unit_cost: Price,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl ShoppingRecord {
    /// Builds a record from submitted form data.
    ///
    /// The discount is re-derived from the prices; callers are expected to
    /// have validated the draft. `created_at` is cut to the millisecond
    /// precision it is persisted with.
    pub fn from_draft(id: String, created_at: DateTime<Utc>, draft: RecordDraft) -> Self {
        let mut record = Self {
            id,
            name: draft.name.trim().to_string(),
            category: draft.category,
            status: draft.status,
            list_price: draft.list_price,
            actual_price: draft.actual_price.unwrap_or_default(),
            discount_rate: draft.discount_rate,
            purchase_date: draft.purchase_date,
            usage_status: draft.usage_status,
            unit_cost_type: draft.unit_cost_type,
            unit_cost: draft.unit_cost,
            link: draft.link.trim().to_string(),
            notes: draft.notes,
            created_at: created_at.trunc_subsecs(3),
        };
        record.refresh_discount();
        record
    }

    /// The record's editable fields, e.g. to pre-fill an edit form.
    #[must_use]
    pub fn to_draft(&self) -> RecordDraft {
        RecordDraft {
            name: self.name.clone(),
            category: self.category,
            status: self.status,
            list_price: self.list_price,
            actual_price: Some(self.actual_price),
            discount_rate: self.discount_rate,
            purchase_date: self.purchase_date.clone(),
            usage_status: self.usage_status,
            unit_cost_type: self.unit_cost_type,
            unit_cost: self.unit_cost,
            link: self.link.clone(),
            notes: self.notes.clone(),
        }
    }

    #[must_use]
    pub fn is_bought(&self) -> bool {
        self.status == PurchaseStatus::Bought
    }

    /// Re-derives `discount_rate` when both prices are positive.
    pub fn refresh_discount(&mut self) {
        if let Some(rate) = derive_discount(self.list_price, self.actual_price) {
            self.discount_rate = rate;
        }
    }

    /// Amount saved against the list price, floored at zero.
    ///
    /// Zero unless both prices are present.
    #[must_use]
    pub fn saving(&self) -> Price {
        if self.list_price.is_zero() || self.actual_price.is_zero() {
            return Price::ZERO;
        }
        self.list_price.saturating_sub(self.actual_price)
    }

    /// Parsed `purchase_date`, `None` when empty or unparsable.
    #[must_use]
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        parse_purchase_date(&self.purchase_date)
    }

    /// Discount rounded for badges (`-25%`), `None` when there is none.
    #[must_use]
    pub fn discount_badge(&self) -> Option<u32> {
        (self.discount_rate > 0.0).then(|| self.discount_rate.round() as u32)
    }
}

/// Discount percentage `(list - actual) / list * 100`, one decimal.
///
/// Returns `None` (meaning "leave the stored rate alone") unless both prices
/// are positive. The result is clamped to `0..=100`.
#[must_use]
pub fn derive_discount(list_price: Price, actual_price: Price) -> Option<f64> {
    if !list_price.is_positive() || !actual_price.is_positive() {
        return None;
    }
    let list = list_price.cents() as f64;
    let actual = actual_price.cents() as f64;
    let rate = (list - actual) / list * 100.0;
    Some(((rate * 10.0).round() / 10.0).clamp(0.0, 100.0))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
#[must_use]
pub fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
