//! Line chart rendering with zoom selection and brush bar.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{tick_interval, ZoomPhase};

/// 40°F expressed in Celsius; drawn as a reference line.
const IDEAL_TEMPERATURE_C: f64 = 4.44;

/// Render the chart view.
///
/// Records the plot and brush rects on the app so mouse events can be
/// mapped back to series indices, and marks the zoom controller ready for
/// brush input once this first pass completes.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(series) = app.series.as_ref().filter(|s| !s.is_empty()) else {
        render_placeholder(frame, app, area);
        return;
    };

    let total_len = series.len();
    let display = app.zoom.displayed(&series.points);
    let display_len = display.len();

    // Copy out everything the widgets need before mutating app.
    let internal: Vec<(f64, f64)> = display
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.internal_temp_c))
        .collect();
    let external: Vec<(f64, f64)> = display
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.external_temp_c))
        .collect();

    let x_max = (display_len.saturating_sub(1)).max(1) as f64;
    let reference = [(0.0, IDEAL_TEMPERATURE_C), (x_max, IDEAL_TEMPERATURE_C)];

    // Adaptive tick label density, a pure function of the displayed length.
    let interval = tick_interval(display_len);
    let x_labels: Vec<Line> = display
        .iter()
        .step_by(interval)
        .map(|p| Line::from(p.display_label.clone()))
        .collect();

    let (y_min, y_max) = y_bounds(display.iter().flat_map(|p| {
        [p.internal_temp_c, p.external_temp_c]
    }));
    let y_labels: Vec<Line> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|v| Line::from(format!("{:.1}", v)))
        .collect();

    let day_count = series.day_count;
    let selection = app.zoom.selection();
    let zoomed = app.zoom.phase() == ZoomPhase::Zoomed;
    let show_brush = total_len > 24;

    let chunks = Layout::vertical(if show_brush {
        vec![Constraint::Min(8), Constraint::Length(1), Constraint::Length(1)]
    } else {
        vec![Constraint::Min(8), Constraint::Length(0), Constraint::Length(1)]
    })
    .split(area);

    // Show dots only when zoomed in enough to tell points apart.
    let marker = if display_len < 50 {
        symbols::Marker::Dot
    } else {
        symbols::Marker::Braille
    };

    let datasets = vec![
        Dataset::default()
            .name("Internal")
            .marker(marker)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.internal))
            .data(&internal),
        Dataset::default()
            .name("External")
            .marker(marker)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.external))
            .data(&external),
        Dataset::default()
            .name("40°F (4.44°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.reference))
            .data(&reference),
    ];

    let title = if day_count > 0 {
        format!(
            " Temperature (°C) — {} day{} ",
            day_count,
            if day_count == 1 { "" } else { "s" }
        )
    } else {
        " Temperature (°C) ".to_string()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let plot_area = block.inner(chunks[0]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(y_labels)
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(chart, chunks[0]);

    if show_brush {
        render_brush(frame, app, chunks[1], total_len);
        app.brush_area = Some(chunks[1]);
    }

    render_footer(frame, app, chunks[2], selection, zoomed, display_len, total_len);

    // Record layout for mouse mapping; the first completed pass enables
    // the brush.
    app.chart_area = Some(plot_area);
    app.zoom.mark_ready();
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.is_loading() {
        "Loading…"
    } else if app.load_error.is_some() {
        "No data — adjust the query and press Enter to retry"
    } else {
        "Enter parameters and press Enter to see the temperature graph"
    };

    let block = Block::default()
        .title(" Temperature (°C) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(message)
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(ratatui::layout::Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the brush bar: the full series with the displayed window marked.
fn render_brush(frame: &mut Frame, app: &App, area: Rect, total_len: usize) {
    let Some(window) = app.zoom.display_range(total_len) else {
        return;
    };
    if area.width == 0 {
        return;
    }

    let width = area.width as usize;
    let mut inside = String::new();
    let mut before = String::new();
    let mut after = String::new();
    for col in 0..width {
        let index = (col * total_len / width).min(total_len - 1);
        if index < window.start {
            before.push('─');
        } else if index <= window.end {
            inside.push('█');
        } else {
            after.push('─');
        }
    }

    let line = Line::from(vec![
        Span::styled(before, Style::default().fg(app.theme.border)),
        Span::styled(inside, Style::default().fg(app.theme.brush)),
        Span::styled(after, Style::default().fg(app.theme.border)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    selection: Option<(usize, usize)>,
    zoomed: bool,
    display_len: usize,
    total_len: usize,
) {
    let text = if let Some((left, right)) = selection {
        format!(
            " Selecting {}..{} — release to zoom",
            left.min(right),
            left.max(right)
        )
    } else if zoomed {
        format!(
            " Showing {} of {} data points — click the chart to reset zoom",
            display_len, total_len
        )
    } else {
        " Tip: click and drag on the chart to zoom into a specific area".to_string()
    };

    let paragraph = Paragraph::new(text).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Y-axis bounds with a little padding around the data and room for the
/// reference line.
fn y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    min = min.min(IDEAL_TEMPERATURE_C);
    max = max.max(IDEAL_TEMPERATURE_C);
    (min - 1.0, max + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_bounds_pad_and_include_the_reference_line() {
        let (min, max) = y_bounds([10.0, 20.0].into_iter());
        assert_eq!(min, IDEAL_TEMPERATURE_C - 1.0);
        assert_eq!(max, 21.0);
    }

    #[test]
    fn y_bounds_of_nothing_are_sane() {
        let (min, max) = y_bounds(std::iter::empty());
        assert!(min < max);
    }
}
