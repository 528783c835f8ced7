use engine::{Price, ShoppingRecord};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Price span, bold for totals.
#[must_use]
pub fn styled_price(price: Price, bold: bool, theme: &Theme) -> Span<'static> {
    let mut style = Style::default().fg(theme.text);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(price.to_string(), style)
}

/// Struck-through list price and a `-25%` badge, when the record has a discount.
#[must_use]
pub fn discount_spans(record: &ShoppingRecord, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if record.list_price > record.actual_price && !record.actual_price.is_zero() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            record.list_price.to_string(),
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT),
        ));
    }
    if let Some(badge) = record.discount_badge() {
        spans.push(Span::styled(
            format!(" -{badge}%"),
            Style::default().fg(theme.saving),
        ));
    }
    spans
}

/// Whole currency units, for chart bars.
#[must_use]
pub fn whole_units(price: Price) -> u64 {
    price.cents() / 100
}
