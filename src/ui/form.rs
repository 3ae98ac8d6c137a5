//! Query form rendering: city and date range inputs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FormField};

/// Render the input panel.
///
/// The focused field is highlighted while the form is capturing input;
/// validation errors appear inline below the fields.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.form.active {
        " Query (editing) "
    } else {
        " Query "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(if app.form.active {
            Style::default().fg(app.theme.highlight)
        } else {
            Style::default().fg(app.theme.border)
        });

    let field = |field: FormField, value: &str| -> Vec<Span<'static>> {
        let focused = app.form.active && app.form.focus == field;
        let style = if focused {
            app.theme.focused_field
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { " " };
        vec![
            Span::styled(format!("{}: ", field.label()), Style::default().add_modifier(Modifier::DIM)),
            Span::styled(format!("{}{}", value, cursor), style),
        ]
    };

    let mut first = field(FormField::City, &app.form.city);
    first.push(Span::raw("  "));
    first.extend(field(FormField::StartDate, &app.form.start_date));
    first.push(Span::raw("  "));
    first.extend(field(FormField::EndDate, &app.form.end_date));

    let second = if let Some(ref err) = app.form_error {
        Line::from(Span::styled(err.clone(), Style::default().fg(app.theme.error)))
    } else {
        Line::from(Span::styled(
            "d/w/m: preset range · Enter: analyze",
            Style::default().add_modifier(Modifier::DIM),
        ))
    };

    let paragraph = Paragraph::new(vec![Line::from(first), second]).block(block);
    frame.render_widget(paragraph, area);
}
