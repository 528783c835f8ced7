//! Plain-text output for the terminal.

use std::fmt::Write as _;

use engine::{RecordPatch, ShoppingRecord, Statistics};

pub fn record_line(record: &ShoppingRecord) -> String {
    let mut line = format!(
        "{id}  {status}  {name}  {price}",
        id = record.id,
        status = record.status.as_str(),
        name = record.name,
        price = record.actual_price,
    );
    if let Some(badge) = record.discount_badge() {
        let _ = write!(line, " (-{badge}%)");
    }
    let _ = write!(line, "  [{}]", record.category);
    if !record.purchase_date.is_empty() {
        let _ = write!(line, "  {}", record.purchase_date);
    }
    line
}

pub fn record_detail(record: &ShoppingRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:         {}", record.id);
    let _ = writeln!(out, "name:       {}", record.name);
    let _ = writeln!(out, "category:   {}", record.category);
    let _ = writeln!(out, "status:     {}", record.status.as_str());
    let _ = writeln!(out, "price:      {}", record.actual_price);
    if !record.list_price.is_zero() {
        let _ = writeln!(out, "list price: {}", record.list_price);
    }
    if let Some(badge) = record.discount_badge() {
        let _ = writeln!(out, "discount:   {badge}%");
    }
    let _ = writeln!(out, "date:       {}", record.purchase_date);
    let _ = writeln!(out, "usage:      {}", record.usage_status.as_str());
    let _ = writeln!(
        out,
        "unit cost:  {} {}",
        record.unit_cost,
        record.unit_cost_type.as_str()
    );
    if !record.link.is_empty() {
        let _ = writeln!(out, "link:       {}", record.link);
    }
    if !record.notes.is_empty() {
        let _ = writeln!(out, "notes:      {}", record.notes);
    }
    out
}

pub fn statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "bought items: {}", stats.bought_count);
    let _ = writeln!(out, "total spent:  {}", stats.total_spent);
    let _ = writeln!(out, "total saved:  {}", stats.total_saved);
    if stats.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\nby category:");
    for entry in &stats.by_category {
        let _ = writeln!(out, "  {:<8} {}", entry.category.label(), entry.total);
    }
    let _ = writeln!(out, "\nby month:");
    for entry in &stats.by_month {
        let _ = writeln!(out, "  {:<8} {}", entry.month, entry.total);
    }
    out
}

pub fn patch(patch: &RecordPatch) -> String {
    let mut out = String::new();
    if let Some(name) = &patch.name {
        let _ = writeln!(out, "name:       {name}");
    }
    if let Some(price) = patch.actual_price {
        let _ = writeln!(out, "price:      {price}");
    }
    if let Some(price) = patch.list_price {
        let _ = writeln!(out, "list price: {price}");
    }
    if let Some(category) = patch.category {
        let _ = writeln!(out, "category:   {category}");
    }
    if let Some(status) = patch.status {
        let _ = writeln!(out, "status:     {}", status.as_str());
    }
    if let Some(date) = &patch.purchase_date {
        let _ = writeln!(out, "date:       {date}");
    }
    if let Some(notes) = &patch.notes {
        let _ = writeln!(out, "notes:      {notes}");
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use engine::{Category, Price, PurchaseStatus, UnitCostType, UsageStatus};

    use super::*;

    fn record() -> ShoppingRecord {
        ShoppingRecord {
            id: "r1".to_string(),
            name: "Sneakers".to_string(),
            category: Category::Clothing,
            status: PurchaseStatus::Bought,
            list_price: Price::new(80_000),
            actual_price: Price::new(60_000),
            discount_rate: 25.0,
            purchase_date: "2025-08-08".to_string(),
            usage_status: UsageStatus::New,
            unit_cost_type: UnitCostType::PerItem,
            unit_cost: Price::ZERO,
            link: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn line_shows_badge_and_category() {
        assert_eq!(
            record_line(&record()),
            "r1  bought  Sneakers  ¥600.00 (-25%)  [服饰/鞋包]  2025-08-08"
        );
    }

    #[test]
    fn detail_prints_values_the_flags_accept() {
        let record = record();
        let text = record_detail(&record);
        assert!(text.contains("status:     bought"));
        assert!(text.contains(&format!("usage:      {}", record.usage_status.as_str())));
        assert!(text.contains(record.unit_cost_type.as_str()));
    }

    #[test]
    fn empty_statistics_print_totals_only() {
        let text = statistics(&Statistics::compute(&[]));
        assert!(text.contains("total spent:  ¥0.00"));
        assert!(!text.contains("by category"));
    }

    #[test]
    fn statistics_list_months() {
        let text = statistics(&Statistics::compute(&[record()]));
        assert!(text.contains("total saved:  ¥200.00"));
        assert!(text.contains("2025-08"));
    }
}
