//! Per-channel statistics cards.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{celsius_to_fahrenheit, ChannelStats};

/// Render the statistics view: one card per channel, side by side.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(stats) = app.stats else {
        let block = Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        let paragraph = Paragraph::new("No data available for statistics")
            .style(Style::default().add_modifier(Modifier::DIM))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let day_count = app.series.as_ref().map(|s| s.day_count).unwrap_or(0);

    let chunks = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).split(area);
    let cards = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_card(frame, app, cards[0], " Internal Temperature ", app.theme.internal, &stats.internal);
    render_card(frame, app, cards[1], " External Temperature ", app.theme.external, &stats.external);

    let footer = format!(
        " Based on {} day{} of data",
        day_count,
        if day_count == 1 { "" } else { "s" }
    );
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().add_modifier(Modifier::DIM)),
        chunks[1],
    );
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    accent: ratatui::style::Color,
    channel: &ChannelStats,
) {
    let row = |label: &str, celsius: f64, bold: bool| -> Line<'static> {
        let value_style = if bold {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("  {:<9}", label), Style::default().add_modifier(Modifier::DIM)),
            Span::styled(format!("{:>7.1} °C", celsius), value_style),
            Span::styled(
                format!("  ({:.1} °F)", celsius_to_fahrenheit(celsius)),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("Current", channel.current, true),
        Line::from(""),
        row("Average", channel.avg, false),
        row("Max", channel.max, false),
        row("Min", channel.min, false),
    ];

    let block = Block::default()
        .title(Span::styled(title.to_string(), Style::default().fg(accent).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
