use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{Toast, ToastLevel},
    ui::theme::Theme,
};

/// Stacks live toasts upwards from the bottom-right corner, newest lowest.
pub fn render(frame: &mut Frame<'_>, area: Rect, toasts: &[&Toast], theme: &Theme) {
    let height = 3u16;
    let mut bottom = area.y + area.height.saturating_sub(1);

    for toast in toasts.iter().rev() {
        if bottom < area.y + height {
            break;
        }
        let width = (Line::from(toast.message.as_str()).width() + 4).min(area.width as usize) as u16;
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: bottom - height,
            width,
            height,
        };
        bottom -= height;

        let style = match toast.level {
            ToastLevel::Info => Style::default().fg(theme.text),
            ToastLevel::Success => Style::default().fg(theme.positive),
            ToastLevel::Error => Style::default().fg(theme.error),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(toast.message.as_str()))
                .style(style)
                .block(block),
            rect,
        );
    }
}
