use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Tab},
    ui::{
        components::{card::Card, money},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let title = match state.tab {
        Tab::Bought => "已购买",
        Tab::Planned => "待购买",
    };
    let card = Card::new(title, theme).focused(true);
    let records = state.visible();

    if records.is_empty() {
        let hint = Line::from(vec![
            Span::styled("暂无记录，按 ", Style::default().fg(theme.dim)),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::styled(" 新建", Style::default().fg(theme.dim)),
        ]);
        card.render_with(frame, area, Paragraph::new(hint).centered());
        return;
    }

    let items = records
        .iter()
        .map(|record| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<12}", record.purchase_date),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(format!("{}  ", record.name)),
                money::styled_price(record.actual_price, false, theme),
            ];
            spans.extend(money::discount_spans(record, theme));
            spans.push(Span::styled(
                format!("  {}", record.category.label()),
                Style::default().fg(theme.dim),
            ));
            if record.is_bought() {
                spans.push(Span::styled(
                    format!("  {}", record.usage_status.label()),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));

    let list = List::new(items)
        .block(card.block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
