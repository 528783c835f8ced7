pub mod advice;
pub mod dialogs;
pub mod form;
pub mod list;
pub mod stats;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
