pub mod card;
pub mod charts;
pub mod hints;
pub mod money;
pub mod tabs;
pub mod toast;

use ratatui::text::Span;

/// Pads `text` with spaces to `width` terminal columns. CJK counts double.
pub fn pad(text: &str, width: usize) -> String {
    let used = Span::raw(text).width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_counts_display_columns() {
        assert_eq!(pad("分类", 6), "分类  ");
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("很长的标签", 4), "很长的标签");
    }
}
