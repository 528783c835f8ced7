use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
};

use crate::ui::theme::Theme;

/// Vertical bar chart, one labelled bar per entry.
pub fn render_bar_chart(frame: &mut Frame<'_>, area: Rect, data: &[(String, u64)], theme: &Theme) {
    let bars: Vec<Bar<'_>> = data
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .label(Line::from(label.as_str()))
                .value(*value)
                .text_value(value.to_string())
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.accent))
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));
    frame.render_widget(chart, area);
}

/// Horizontal bar such as `████████░░░░` for `value` out of `max`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }
    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_bar_scales_to_max() {
        assert_eq!(ascii_bar(5, 10, 4), "██░░");
        assert_eq!(ascii_bar(10, 10, 3), "███");
        assert_eq!(ascii_bar(20, 10, 3), "███");
        assert_eq!(ascii_bar(0, 0, 2), "░░");
    }
}
