use engine::Statistics;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::Card,
            pad,
            charts::{ascii_bar, render_bar_chart},
            money::{styled_price, whole_units},
        },
        theme::Theme,
    },
};

const BAR_WIDTH: usize = 12;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let stats = &state.stats;
    let [totals, categories, months] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(stats.by_category.len().max(1) as u16 + 2),
        Constraint::Min(6),
    ])
    .areas(area);

    render_totals(frame, totals, stats, theme);
    render_categories(frame, categories, stats, theme);
    render_months(frame, months, stats, theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, stats: &Statistics, theme: &Theme) {
    let lines = vec![
        Line::from(vec![
            Span::styled("总支出  ", Style::default().fg(theme.dim)),
            styled_price(stats.total_spent, true, theme),
        ]),
        Line::from(vec![
            Span::styled("已节省  ", Style::default().fg(theme.dim)),
            Span::styled(
                stats.total_saved.to_string(),
                Style::default().fg(theme.positive),
            ),
        ]),
        Line::from(vec![
            Span::styled("已购件数  ", Style::default().fg(theme.dim)),
            Span::raw(stats.bought_count.to_string()),
        ]),
    ];
    Card::new("汇总", theme).render_with(frame, area, Paragraph::new(lines));
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, stats: &Statistics, theme: &Theme) {
    let card = Card::new("分类支出", theme);
    if stats.by_category.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled("暂无已购记录", Style::default().fg(theme.dim))),
        );
        return;
    }

    let max = stats
        .by_category
        .iter()
        .map(|entry| entry.total.cents())
        .max()
        .unwrap_or(0);
    let lines = stats
        .by_category
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::raw(pad(entry.category.label(), 11)),
                Span::styled(
                    ascii_bar(entry.total.cents(), max, BAR_WIDTH),
                    Style::default().fg(theme.accent),
                ),
                Span::raw(format!(" {}", entry.total)),
            ])
        })
        .collect::<Vec<_>>();
    card.render_with(frame, area, Paragraph::new(lines));
}

fn render_months(frame: &mut Frame<'_>, area: Rect, stats: &Statistics, theme: &Theme) {
    let card = Card::new("月度支出", theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    let data = stats
        .by_month
        .iter()
        .map(|entry| (entry.month.short_label(), whole_units(entry.total)))
        .collect::<Vec<_>>();
    render_bar_chart(frame, inner, &data, theme);
}
