//! Raw data table over the currently displayed window.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;

/// Render the raw data view.
///
/// The table follows the chart's zoom window, so drilling into a spike on
/// the graph and switching views shows exactly those readings. Scrolling is
/// manual via `table_offset`; the offset is clamped by the app when the
/// window changes.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(series) = app.series.as_ref().filter(|s| !s.is_empty()) else {
        let block = Block::default()
            .title(" Raw Data ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        let paragraph = Paragraph::new("No data to display")
            .style(Style::default().add_modifier(Modifier::DIM))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let total_len = series.len();
    let display = app.zoom.displayed(&series.points);

    let visible_rows = area.height.saturating_sub(3) as usize; // border + header
    let max_offset = display.len().saturating_sub(visible_rows);
    let offset = app.table_offset.min(max_offset);

    let rows: Vec<Row> = display
        .iter()
        .skip(offset)
        .take(visible_rows)
        .map(|p| {
            Row::new(vec![
                p.display_label.clone(),
                format!("{:>8.1}", p.internal_temp_c),
                format!("{:>8.1}", p.external_temp_c),
            ])
        })
        .collect();

    let title = if display.len() < total_len {
        format!(" Raw Data — showing {} of {} readings ", display.len(), total_len)
    } else {
        format!(" Raw Data — {} readings ", total_len)
    };

    let header = Row::new(vec!["Timestamp", "Internal (°C)", "External (°C)"])
        .style(app.theme.header)
        .bottom_margin(1);

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);

    // Persist the clamped offset so keyboard scrolling starts from what is
    // actually on screen.
    app.table_offset = offset;
}
