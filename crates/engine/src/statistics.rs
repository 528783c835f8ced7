//! Spending statistics derived from the record collection.
//!
//! Everything here is a pure function of a record slice, recomputed on every
//! call. Only bought records take part; planned ones never reach any total.

use std::{collections::BTreeMap, fmt};

use chrono::Datelike;
use serde::Serialize;

use crate::{Category, Price, ShoppingRecord};

/// Calendar month a purchase falls into.
///
/// Records whose purchase date cannot be parsed land in [`Unknown`], which
/// sorts after every real month.
///
/// [`Unknown`]: MonthBucket::Unknown
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthBucket {
    Month { year: i32, month: u32 },
    Unknown,
}

impl MonthBucket {
    fn of(record: &ShoppingRecord) -> Self {
        match record.purchase_date() {
            Some(date) => MonthBucket::Month {
                year: date.year(),
                month: date.month(),
            },
            None => MonthBucket::Unknown,
        }
    }

    /// Short chart label, e.g. `3月`.
    #[must_use]
    pub fn short_label(&self) -> String {
        match self {
            MonthBucket::Month { month, .. } => format!("{month}月"),
            MonthBucket::Unknown => "?".to_string(),
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthBucket::Month { year, month } => write!(f, "{year}-{month:02}"),
            MonthBucket::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Price,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub month: MonthBucket,
    pub total: Price,
}

/// Aggregates over the bought records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub bought_count: usize,
    pub total_spent: Price,
    pub total_saved: Price,
    /// Per-category spend, in order of first appearance.
    pub by_category: Vec<CategoryTotal>,
    /// Per-month spend, chronological, unknown dates last.
    pub by_month: Vec<MonthTotal>,
}

impl Statistics {
    pub fn compute(records: &[ShoppingRecord]) -> Self {
        let bought: Vec<&ShoppingRecord> = records.iter().filter(|r| r.is_bought()).collect();

        let total_spent: Price = bought.iter().map(|r| r.actual_price).sum();
        let total_saved: Price = bought.iter().map(|r| r.saving()).sum();

        let mut by_category: Vec<CategoryTotal> = Vec::new();
        for record in &bought {
            match by_category
                .iter_mut()
                .find(|entry| entry.category == record.category)
            {
                Some(entry) => entry.total += record.actual_price,
                None => by_category.push(CategoryTotal {
                    category: record.category,
                    total: record.actual_price,
                }),
            }
        }

        let mut months: BTreeMap<MonthBucket, Price> = BTreeMap::new();
        for record in &bought {
            *months.entry(MonthBucket::of(record)).or_default() += record.actual_price;
        }
        let by_month = months
            .into_iter()
            .map(|(month, total)| MonthTotal { month, total })
            .collect();

        Self {
            bought_count: bought.len(),
            total_spent,
            total_saved,
            by_category,
            by_month,
        }
    }

    /// `true` when no bought record exists; front ends hide the panel then.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bought_count == 0
    }

    #[must_use]
    pub fn category_total(&self, category: Category) -> Price {
        self.by_category
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{PurchaseStatus, UnitCostType, UsageStatus};

    fn bought(id: &str, actual: u64, list: u64, category: Category, date: &str) -> ShoppingRecord {
        ShoppingRecord {
            id: id.to_string(),
            name: id.to_string(),
            category,
            status: PurchaseStatus::Bought,
            list_price: Price::new(list),
            actual_price: Price::new(actual),
            discount_rate: 0.0,
            purchase_date: date.to_string(),
            usage_status: UsageStatus::New,
            unit_cost_type: UnitCostType::PerItem,
            unit_cost: Price::ZERO,
            link: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn months_sort_chronologically_with_unknown_last() {
        let records = vec![
            bought("a", 100, 0, Category::Food, "not a date"),
            bought("b", 200, 0, Category::Food, "2025-02-01"),
            bought("c", 300, 0, Category::Food, "2024-12-31"),
        ];
        let stats = Statistics::compute(&records);
        let months: Vec<MonthBucket> = stats.by_month.iter().map(|m| m.month).collect();
        assert_eq!(
            months,
            vec![
                MonthBucket::Month { year: 2024, month: 12 },
                MonthBucket::Month { year: 2025, month: 2 },
                MonthBucket::Unknown,
            ]
        );
    }

    #[test]
    fn same_month_of_different_years_stay_apart() {
        let records = vec![
            bought("a", 100, 0, Category::Food, "2024-03-01"),
            bought("b", 200, 0, Category::Food, "2025-03-01"),
        ];
        assert_eq!(Statistics::compute(&records).by_month.len(), 2);
    }

    #[test]
    fn labels() {
        let month = MonthBucket::Month { year: 2025, month: 3 };
        assert_eq!(month.to_string(), "2025-03");
        assert_eq!(month.short_label(), "3月");
        assert_eq!(MonthBucket::Unknown.to_string(), "unknown");
    }

    #[test]
    fn empty_input_is_empty() {
        let stats = Statistics::compute(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.total_spent, Price::ZERO);
        assert_eq!(stats.category_total(Category::Food), Price::ZERO);
    }
}
