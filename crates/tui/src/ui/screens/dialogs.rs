use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    app::{SmartAddState, SmartField},
    ui::{
        components::{card::Card, pad},
        screens::centered,
        theme::Theme,
    },
};

pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, name: &str, theme: &Theme) {
    let rect = centered(area, 48, 5);
    let lines = vec![
        Line::from(format!("删除此项目？「{name}」")),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::styled(" 删除   其他键保留", Style::default().fg(theme.dim)),
        ]),
    ];
    frame.render_widget(Clear, rect);
    Card::new("确认删除", theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines).wrap(Wrap { trim: true }));
}

pub fn render_smart_add(frame: &mut Frame<'_>, area: Rect, smart: &SmartAddState, theme: &Theme) {
    let rect = centered(area, 64, 9);
    let field = |label: &'static str, value: &str, which: SmartField| {
        let focused = smart.focus == which && !smart.pending;
        let style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled(pad(label, 8), style),
            Span::raw(format!("{value}{cursor}")),
        ])
    };

    let status = if smart.pending {
        Span::styled("识别中…", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            "描述商品 (例如: MacBook Pro, 12999元)，或填写截图路径 (最大 4 MB)",
            Style::default().fg(theme.dim),
        )
    };

    let lines = vec![
        field("描述", &smart.text, SmartField::Text),
        field("图片", &smart.image_path, SmartField::Image),
        Line::from(""),
        Line::from(status),
    ];
    frame.render_widget(Clear, rect);
    Card::new("智能添加", theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines).wrap(Wrap { trim: false }));
}
