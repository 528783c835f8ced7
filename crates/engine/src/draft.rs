//! Form data and partial records.
//!
//! A [`RecordDraft`] is everything the user edits (a record without `id` and
//! `createdAt`). A [`RecordPatch`] is a best-effort partial record, the shape
//! returned by the AI collaborator, merged over a draft before the user
//! confirms it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Category, EngineError, Price, PurchaseStatus, ResultEngine, UnitCostType, UsageStatus,
    record::derive_discount,
};

/// Editable fields of a record.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub category: Category,
    pub status: PurchaseStatus,
    pub list_price: Price,
    /// Required at submission; `None` until supplied.
    pub actual_price: Option<Price>,
    pub discount_rate: f64,
    pub purchase_date: String,
    pub usage_status: UsageStatus,
    pub unit_cost_type: UnitCostType,
    pub unit_cost: Price,
    pub link: String,
    pub notes: String,
}

impl RecordDraft {
    /// Empty draft dated `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            category: Category::Other,
            status: PurchaseStatus::Planned,
            list_price: Price::ZERO,
            actual_price: None,
            discount_rate: 0.0,
            purchase_date: today.format("%Y-%m-%d").to_string(),
            usage_status: UsageStatus::New,
            unit_cost_type: UnitCostType::PerItem,
            unit_cost: Price::ZERO,
            link: String::new(),
            notes: String::new(),
        }
    }

    /// Draft pre-filled with `patch`.
    #[must_use]
    pub fn from_patch(today: NaiveDate, patch: RecordPatch) -> Self {
        let mut draft = Self::new(today);
        draft.apply_patch(patch);
        draft
    }

    /// Overwrites the fields `patch` supplies and re-derives the discount.
    pub fn apply_patch(&mut self, patch: RecordPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(list_price) = patch.list_price {
            self.list_price = list_price;
        }
        if let Some(actual_price) = patch.actual_price {
            self.actual_price = Some(actual_price);
        }
        if let Some(discount_rate) = patch.discount_rate {
            self.discount_rate = discount_rate;
        }
        if let Some(purchase_date) = patch.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(usage_status) = patch.usage_status {
            self.usage_status = usage_status;
        }
        if let Some(unit_cost_type) = patch.unit_cost_type {
            self.unit_cost_type = unit_cost_type;
        }
        if let Some(unit_cost) = patch.unit_cost {
            self.unit_cost = unit_cost;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.refresh_discount();
    }

    /// Re-derives `discount_rate` when both prices are positive.
    pub fn refresh_discount(&mut self) {
        if let Some(rate) = derive_discount(self.list_price, self.actual_price.unwrap_or_default())
        {
            self.discount_rate = rate;
        }
    }

    /// Checks the two required fields: a non-blank name and an actual price.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::Validation("name is required".to_string()));
        }
        if self.actual_price.is_none() {
            return Err(EngineError::Validation(
                "actual price is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Best-effort partial record.
///
/// Every field is optional. Built from loosely-typed JSON with
/// [`RecordPatch::from_value`], which drops fields it cannot understand
/// instead of failing the whole patch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_status: Option<UsageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_type: Option<UnitCostType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecordPatch {
    /// Parses a JSON object field by field.
    ///
    /// Only a non-object input is an error. Unknown enum values, negative or
    /// non-numeric prices and blank strings are skipped.
    pub fn from_value(value: Value) -> ResultEngine<Self> {
        let Value::Object(map) = value else {
            return Err(EngineError::InvalidValue(
                "expected a JSON object".to_string(),
            ));
        };

        Ok(Self {
            name: text(&map, "name"),
            category: text(&map, "category").map(|raw| Category::parse_lenient(&raw)),
            status: text(&map, "status").and_then(|raw| PurchaseStatus::try_from(raw.as_str()).ok()),
            list_price: price(&map, "listPrice"),
            actual_price: price(&map, "actualPrice"),
            discount_rate: number(&map, "discountRate").filter(|rate| (0.0..=100.0).contains(rate)),
            purchase_date: text(&map, "purchaseDate"),
            usage_status: text(&map, "usageStatus")
                .and_then(|raw| UsageStatus::try_from(raw.as_str()).ok()),
            unit_cost_type: text(&map, "unitCostType")
                .and_then(|raw| UnitCostType::try_from(raw.as_str()).ok()),
            unit_cost: price(&map, "unitCost"),
            link: text(&map, "link"),
            notes: text(&map, "notes"),
        })
    }

    /// A successful parse names the item and its price.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.trim().is_empty())
            && self.actual_price.is_some()
    }
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    match map.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn price(map: &Map<String, Value>, key: &str) -> Option<Price> {
    match map.get(key)? {
        Value::Number(n) => n.as_f64().and_then(|v| Price::from_major(v).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn new_draft_has_form_defaults() {
        let draft = RecordDraft::new(today());
        assert_eq!(draft.category, Category::Other);
        assert_eq!(draft.status, PurchaseStatus::Planned);
        assert_eq!(draft.purchase_date, "2025-06-01");
        assert_eq!(draft.usage_status, UsageStatus::New);
        assert_eq!(draft.unit_cost_type, UnitCostType::PerItem);
        assert_eq!(draft.actual_price, None);
    }

    #[test]
    fn validate_requires_name_and_actual_price() {
        let mut draft = RecordDraft::new(today());
        assert_eq!(
            draft.validate(),
            Err(EngineError::Validation("name is required".to_string()))
        );
        draft.name = "   ".to_string();
        assert!(draft.validate().is_err());
        draft.name = "Headphones".to_string();
        assert_eq!(
            draft.validate(),
            Err(EngineError::Validation(
                "actual price is required".to_string()
            ))
        );
        draft.actual_price = Some(Price::ZERO);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn patch_parsing_skips_bad_fields() {
        let patch = RecordPatch::from_value(json!({
            "name": "MacBook Pro",
            "actualPrice": 12999,
            "listPrice": -5,
            "category": "数码/电器",
            "status": "bought",
            "usageStatus": "broken",
            "unitCostType": "per_day",
            "purchaseDate": "",
            "discountRate": 250,
        }))
        .unwrap();

        assert_eq!(patch.name.as_deref(), Some("MacBook Pro"));
        assert_eq!(patch.actual_price, Some(Price::new(1_299_900)));
        assert_eq!(patch.list_price, None);
        assert_eq!(patch.category, Some(Category::Electronics));
        assert_eq!(patch.status, Some(PurchaseStatus::Bought));
        assert_eq!(patch.usage_status, None);
        assert_eq!(patch.unit_cost_type, Some(UnitCostType::PerDay));
        assert_eq!(patch.purchase_date, None);
        assert_eq!(patch.discount_rate, None);
        assert!(patch.is_recognized());
    }

    #[test]
    fn patch_accepts_numeric_strings() {
        let patch = RecordPatch::from_value(json!({"name": "Tea", "actualPrice": "35.5"})).unwrap();
        assert_eq!(patch.actual_price, Some(Price::new(3_550)));
    }

    #[test]
    fn patch_rejects_non_objects() {
        assert!(RecordPatch::from_value(json!(["name"])).is_err());
    }

    #[test]
    fn patch_without_price_is_not_recognized() {
        let patch = RecordPatch::from_value(json!({"name": "Something"})).unwrap();
        assert!(!patch.is_recognized());
    }

    #[test]
    fn applying_patch_keeps_unsupplied_fields_and_derives_discount() {
        let mut draft = RecordDraft::new(today());
        draft.notes = "gift".to_string();
        draft.apply_patch(RecordPatch {
            name: Some("Sneakers".to_string()),
            list_price: Some(Price::new(80_000)),
            actual_price: Some(Price::new(60_000)),
            ..RecordPatch::default()
        });
        assert_eq!(draft.name, "Sneakers");
        assert_eq!(draft.notes, "gift");
        assert_eq!(draft.purchase_date, "2025-06-01");
        assert_eq!(draft.discount_rate, 25.0);
    }
}
