use std::io::Write;

use csv::Writer;
use engine::ShoppingRecord;
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    status: &'a str,
    list_price: String,
    actual_price: String,
    discount_rate: f64,
    purchase_date: &'a str,
    usage_status: &'a str,
    unit_cost_type: &'a str,
    unit_cost: String,
    link: &'a str,
    notes: &'a str,
    created_at: String,
}

impl<'a> From<&'a ShoppingRecord> for ExportRow<'a> {
    fn from(record: &'a ShoppingRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            category: record.category.label(),
            status: record.status.as_str(),
            list_price: decimal(record.list_price),
            actual_price: decimal(record.actual_price),
            discount_rate: record.discount_rate,
            purchase_date: &record.purchase_date,
            usage_status: record.usage_status.as_str(),
            unit_cost_type: record.unit_cost_type.as_str(),
            unit_cost: decimal(record.unit_cost),
            link: &record.link,
            notes: &record.notes,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

fn decimal(price: engine::Price) -> String {
    format!("{}.{:02}", price.cents() / 100, price.cents() % 100)
}

/// Writes every record as one CSV row, in storage order.
pub fn write_csv<W: Write>(out: W, records: &[ShoppingRecord]) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use engine::{Category, Price, PurchaseStatus, UnitCostType, UsageStatus};

    use super::*;

    #[test]
    fn rows_follow_header() {
        let record = ShoppingRecord {
            id: "abc".to_string(),
            name: "Notebook, A5".to_string(),
            category: Category::Books,
            status: PurchaseStatus::Bought,
            list_price: Price::new(1_500),
            actual_price: Price::new(1_200),
            discount_rate: 20.0,
            purchase_date: "2025-09-01".to_string(),
            usage_status: UsageStatus::InUse,
            unit_cost_type: UnitCostType::PerItem,
            unit_cost: Price::new(1_200),
            link: String::new(),
            notes: String::new(),
            created_at: Utc.timestamp_millis_opt(0).unwrap(),
        };
        let mut out = Vec::new();
        write_csv(&mut out, &[record]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "id,name,category,status,list_price,actual_price,discount_rate,purchase_date,\
                 usage_status,unit_cost_type,unit_cost,link,notes,created_at"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "abc,\"Notebook, A5\",图书/文具,bought,15.00,12.00,20.0,2025-09-01,in_use,\
                 per_item,12.00,,,1970-01-01T00:00:00+00:00"
            )
        );
    }
}
