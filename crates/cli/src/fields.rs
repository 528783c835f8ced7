//! Record fields given as command-line flags.

use clap::Args;
use engine::{Category, Price, PurchaseStatus, RecordPatch, UnitCostType, UsageStatus};

#[derive(Args, Debug, Default, Clone)]
pub struct RecordFields {
    /// Product name.
    #[arg(long)]
    pub name: Option<String>,
    /// Price paid (e.g. 59.90).
    #[arg(long = "price")]
    pub actual_price: Option<Price>,
    /// Original or market price.
    #[arg(long)]
    pub list_price: Option<Price>,
    /// Category label or slug (e.g. 数码/电器, electronics).
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    /// bought | planned
    #[arg(long, value_parser = parse_status)]
    pub status: Option<PurchaseStatus>,
    /// Purchase date, YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,
    /// new | in_use | finished | idle | returned
    #[arg(long, value_parser = parse_usage)]
    pub usage: Option<UsageStatus>,
    /// per_item | per_use | per_day | per_gram | total
    #[arg(long, value_parser = parse_unit_cost_type)]
    pub unit_cost_type: Option<UnitCostType>,
    #[arg(long)]
    pub unit_cost: Option<Price>,
    #[arg(long)]
    pub link: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<RecordFields> for RecordPatch {
    fn from(fields: RecordFields) -> Self {
        RecordPatch {
            name: fields.name,
            category: fields.category,
            status: fields.status,
            list_price: fields.list_price,
            actual_price: fields.actual_price,
            discount_rate: None,
            purchase_date: fields.date,
            usage_status: fields.usage,
            unit_cost_type: fields.unit_cost_type,
            unit_cost: fields.unit_cost,
            link: fields.link,
            notes: fields.notes,
        }
    }
}

pub fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.slug()).collect();
        format!("unknown category {raw:?} (expected one of {})", known.join(", "))
    })
}

pub fn parse_status(raw: &str) -> Result<PurchaseStatus, String> {
    PurchaseStatus::try_from(raw).map_err(|_| format!("unknown status {raw:?}"))
}

fn parse_usage(raw: &str) -> Result<UsageStatus, String> {
    UsageStatus::try_from(raw).map_err(|_| format!("unknown usage status {raw:?}"))
}

fn parse_unit_cost_type(raw: &str) -> Result<UnitCostType, String> {
    UnitCostType::try_from(raw).map_err(|_| format!("unknown unit cost type {raw:?}"))
}
