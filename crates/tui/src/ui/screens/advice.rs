use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::AppState,
    ui::{components::card::Card, theme::Theme},
};

/// Height the advice box needs, zero when hidden.
pub fn height(state: &AppState) -> u16 {
    if state.advice.pending || state.advice.text.is_some() {
        6
    } else {
        0
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("AI 建议", theme);
    let content = match (&state.advice.text, state.advice.pending) {
        (_, true) => Paragraph::new(Span::styled("思考中…", Style::default().fg(theme.dim))),
        (Some(text), false) => Paragraph::new(text.as_str()).wrap(Wrap { trim: true }),
        (None, false) => return,
    };
    card.render_with(frame, area, content);
}
