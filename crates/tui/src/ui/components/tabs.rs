use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Tab, ui::theme::Theme};

/// Tab bar with the record count of each status.
pub fn render_tabs(
    frame: &mut Frame<'_>,
    area: Rect,
    active: Tab,
    (bought, planned): (usize, usize),
    theme: &Theme,
) {
    let tabs = [
        (Tab::Bought, "已购买", bought),
        (Tab::Planned, "待购买", planned),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (tab, label, count)) in tabs.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let text = format!("{label} ({count})");
        if tab == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                text,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(text, Style::default().fg(theme.dim)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
