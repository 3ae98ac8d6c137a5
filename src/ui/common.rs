//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::ZoomPhase;

/// Render the header bar with the current query and data overview.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" TEMPWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
    ];

    if let Some(ref query) = app.last_query {
        spans.push(Span::styled(
            query.city.clone(),
            Style::default().fg(app.theme.highlight),
        ));
        spans.push(Span::raw(format!(
            " {} → {} │ ",
            query.start_date, query.end_date
        )));
    }

    match app.series {
        Some(ref series) => {
            spans.push(Span::styled(
                format!("{}", series.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" points │ "));
            spans.push(Span::raw(if series.day_count == 1 {
                "1 day".to_string()
            } else {
                format!("{} days", series.day_count)
            }));
            if app.zoom.phase() == ZoomPhase::Zoomed {
                spans.push(Span::styled(
                    " │ zoomed",
                    Style::default().fg(app.theme.highlight),
                ));
            }
        }
        None => {
            spans.push(Span::styled(
                if app.is_loading() { "loading..." } else { "no data" },
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Graph "),
        Line::from(" 2:Statistics "),
        Line::from(" 3:Raw Data "),
    ];

    let selected = match app.current_view {
        View::Chart => 0,
        View::Stats => 1,
        View::Table => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows fetch progress, errors, temporary status messages, and the
/// controls available in the current context.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" {} │ e:edit Enter:retry q:quit", err))
            .style(Style::default().fg(app.theme.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if app.is_loading() {
        format!(" Loading… │ {} │ q:quit", app.source_description())
    } else if app.form.active {
        " Type to edit │ Tab:next field Enter:analyze Esc:done".to_string()
    } else {
        let controls = match app.current_view {
            View::Chart => "drag:zoom +/-:step 0:reset e:edit Enter:analyze ?:help q:quit",
            View::Stats => "e:edit Enter:analyze Tab:switch ?:help q:quit",
            View::Table => "↑↓:scroll e:edit Enter:analyze Tab:switch ?:help q:quit",
        };
        format!(" {} │ {} │ {}", app.current_view.label(), app.source_description(), controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Query",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e /       Edit city and dates"),
        Line::from("  Tab       Next field (while editing)"),
        Line::from("  Enter     Analyze (submit)"),
        Line::from("  d w m     Preset: last 24h / 7d / 30d"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Graph",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  drag      Select a range to zoom into"),
        Line::from("  click     Reset zoom"),
        Line::from("  + / -     Zoom in / out"),
        Line::from("  0         Reset zoom"),
        Line::from("  scroll    Zoom in / out"),
        Line::from("  brush     Drag the bar under the chart"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1/2/3     Graph / Statistics / Raw Data"),
        Line::from("  x         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
