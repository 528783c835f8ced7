use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    form::{FormField, FormState},
    ui::{
        components::{card::Card, pad},
        screens::centered,
        theme::Theme,
    },
};

const LABEL_WIDTH: usize = 16;

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &FormState, theme: &Theme) {
    let rect = centered(area, 64, FormField::ALL.len() as u16 + 6);
    let title = if form.is_new() { "新项目" } else { "编辑" };

    let mut lines = FormField::ALL
        .iter()
        .map(|field| field_line(form, *field, theme))
        .collect::<Vec<_>>();

    lines.push(Line::from(""));
    let discount = form.live_discount();
    lines.push(Line::from(vec![
        Span::styled(
            pad("折扣", LABEL_WIDTH),
            Style::default().fg(theme.dim),
        ),
        Span::styled(format!("{discount:.1}%"), Style::default().fg(theme.saving)),
    ]));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(Clear, rect);
    Card::new(title, theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines));
}

fn field_line<'a>(form: &'a FormState, field: FormField, theme: &Theme) -> Line<'a> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };

    let mut value = form.display(field);
    if field.is_choice() {
        value = format!("‹ {value} ›");
    } else if focused {
        value.push('▏');
    }

    Line::from(vec![
        Span::styled(pad(field.label(), LABEL_WIDTH), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}
