//! Presentation helpers over the stored order.
//!
//! These never change the store: they filter and reorder for display.

use crate::{PurchaseStatus, ShoppingRecord};

/// Records with `status`, in display order (reverse of storage order).
pub fn by_status(records: &[ShoppingRecord], status: PurchaseStatus) -> Vec<&ShoppingRecord> {
    records
        .iter()
        .rev()
        .filter(|record| record.status == status)
        .collect()
}

/// `(bought, planned)` counts.
#[must_use]
pub fn status_counts(records: &[ShoppingRecord]) -> (usize, usize) {
    let bought = records.iter().filter(|record| record.is_bought()).count();
    (bought, records.len() - bought)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{Category, Price, UnitCostType, UsageStatus};

    fn record(id: &str, status: PurchaseStatus) -> ShoppingRecord {
        ShoppingRecord {
            id: id.to_string(),
            name: id.to_string(),
            category: Category::Other,
            status,
            list_price: Price::ZERO,
            actual_price: Price::new(100),
            discount_rate: 0.0,
            purchase_date: String::new(),
            usage_status: UsageStatus::New,
            unit_cost_type: UnitCostType::PerItem,
            unit_cost: Price::ZERO,
            link: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn filters_and_reverses() {
        let records = vec![
            record("c", PurchaseStatus::Bought),
            record("b", PurchaseStatus::Planned),
            record("a", PurchaseStatus::Bought),
        ];
        let ids: Vec<&str> = by_status(&records, PurchaseStatus::Bought)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(status_counts(&records), (2, 1));
    }
}
