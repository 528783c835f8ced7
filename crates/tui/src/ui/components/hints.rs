use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Mode},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }
    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently has the keyboard.
pub fn for_state(state: &AppState) -> Vec<KeyHint> {
    match &state.mode {
        Mode::Browse => {
            let mut hints = vec![
                KeyHint::new("Tab", "已购/待购"),
                KeyHint::new("n", "新建"),
                KeyHint::new("e", "编辑"),
                KeyHint::new("d", "删除"),
                KeyHint::new("s", "报表"),
            ];
            if state.assistant_ready {
                hints.push(KeyHint::new("i", "智能添加"));
                if !state.advice.pending {
                    hints.push(KeyHint::new("g", "AI 建议"));
                }
            }
            if state.advice.text.is_some() {
                hints.push(KeyHint::new("x", "关闭建议"));
            }
            hints
        }
        Mode::Form(_) => vec![
            KeyHint::new("Tab", "下一项"),
            KeyHint::new("←→", "选择"),
            KeyHint::new("Enter", "保存"),
            KeyHint::new("Esc", "取消"),
        ],
        Mode::ConfirmDelete { .. } => vec![
            KeyHint::new("y", "删除"),
            KeyHint::new("其他键", "保留"),
        ],
        Mode::SmartAdd(smart) if smart.pending => vec![KeyHint::new("Esc", "关闭")],
        Mode::SmartAdd(_) => vec![
            KeyHint::new("Tab", "描述/图片"),
            KeyHint::new("Enter", "识别"),
            KeyHint::new("Esc", "关闭"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn browse_hints_depend_on_assistant() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let offline = AppState::new(Vec::new(), today, false, Instant::now());
        assert!(!for_state(&offline).contains(&KeyHint::new("i", "智能添加")));

        let mut online = AppState::new(Vec::new(), today, true, Instant::now());
        assert!(for_state(&online).contains(&KeyHint::new("g", "AI 建议")));
        online.advice.pending = true;
        assert!(!for_state(&online).contains(&KeyHint::new("g", "AI 建议")));
    }
}
