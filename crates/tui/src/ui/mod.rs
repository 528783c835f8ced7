pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let [info, tabs, content, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_info_bar(frame, info, state, &theme);
    components::tabs::render_tabs(frame, tabs, state.tab, state.counts(), &theme);
    render_content(frame, content, state, &theme);
    render_bottom_bar(frame, bottom, state, &theme);

    match &state.mode {
        Mode::Browse => {}
        Mode::Form(form) => screens::form::render(frame, area, form, &theme),
        Mode::ConfirmDelete { name, .. } => {
            screens::dialogs::render_confirm(frame, area, name, &theme);
        }
        Mode::SmartAdd(smart) => screens::dialogs::render_smart_add(frame, area, smart, &theme),
    }

    let toasts: Vec<_> = state.toasts.iter().collect();
    components::toast::render(frame, area, &toasts, &theme);
}

fn render_content(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let [main, advice] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(screens::advice::height(state)),
    ])
    .areas(area);

    if state.show_stats {
        let [list, stats] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(main);
        screens::list::render(frame, list, state, theme);
        screens::stats::render(frame, stats, state, theme);
    } else {
        screens::list::render(frame, main, state, theme);
    }

    screens::advice::render(frame, advice, state, theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (ai, ai_style) = if state.assistant_ready {
        ("就绪", Style::default().fg(theme.positive))
    } else {
        ("未配置", Style::default().fg(theme.dim))
    };

    let line = Line::from(vec![
        Span::styled(" SmartShop", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("今天", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.today.format("%Y-%m-%d"))),
        Span::styled("总支出", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.stats.total_spent)),
        Span::styled("已节省", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.stats.total_saved)),
        Span::styled("AI", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::styled(ai, ai_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![Span::raw(" ")];
    parts.extend(components::hints::hints_to_spans(
        &components::hints::for_state(state),
        theme,
    ));

    if !state.mode.is_typing() {
        parts.push(components::hints::hint_separator(theme));
        parts.push(Span::styled("q", Style::default().fg(theme.accent)));
        parts.push(Span::raw(" 退出"));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
