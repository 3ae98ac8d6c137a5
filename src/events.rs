use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Preset, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If the form is capturing input, handle text entry
    if app.form.active {
        handle_form_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Chart),
        KeyCode::Char('2') => app.set_view(View::Stats),
        KeyCode::Char('3') => app.set_view(View::Table),

        // Edit the query form
        KeyCode::Char('e') | KeyCode::Char('/') => app.start_form_edit(),

        // Submit (resubmit) the current form
        KeyCode::Enter | KeyCode::Char('r') => app.submit(),

        // Date range presets
        KeyCode::Char('d') => app.apply_preset(Preset::Last24Hours),
        KeyCode::Char('w') => app.apply_preset(Preset::Last7Days),
        KeyCode::Char('m') => app.apply_preset(Preset::Last30Days),

        // Zoom commands (chart view)
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Char('0') | KeyCode::Esc => app.reset_zoom(),

        // Table scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            if app.current_view == View::Table {
                app.scroll_table(-1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.current_view == View::Table {
                app.scroll_table(1);
            }
        }
        KeyCode::PageUp => {
            if app.current_view == View::Table {
                app.scroll_table(-10);
            }
        }
        KeyCode::PageDown => {
            if app.current_view == View::Table {
                app.scroll_table(10);
            }
        }
        KeyCode::Home => {
            if app.current_view == View::Table {
                app.scroll_table(isize::MIN / 2);
            }
        }

        // Export
        KeyCode::Char('x') => {
            let export_path = std::path::PathBuf::from("temperature_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key input while the form is active
fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Submit the form
        KeyCode::Enter => app.submit(),

        // Leave input mode, keep the typed values
        KeyCode::Esc => app.cancel_form_edit(),

        // Field navigation
        KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev_field(),

        // Backspace
        KeyCode::Backspace => app.form_pop(),

        // Type characters
        KeyCode::Char(c) => app.form_push(c),

        _ => {}
    }
}

/// Handle mouse events
///
/// Drag on the chart body selects a zoom range; drag on the brush bar sets
/// the range directly; the scroll wheel steps the zoom. All mapping is done
/// against layout rects recorded by the chart renderer, so events landing
/// outside them are ignored.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.current_view != View::Chart {
        // Scroll still works for the table view
        if app.current_view == View::Table {
            match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_table(-1),
                MouseEventKind::ScrollDown => app.scroll_table(1),
                _ => {}
            }
        }
        return;
    }

    let len = app.series_len();

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in(),
        MouseEventKind::ScrollDown => app.zoom_out(),

        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(chart) = app.chart_area {
                if contains(chart, mouse.column, mouse.row) {
                    app.zoom.mouse_down(mouse.column, chart.x, chart.width, len);
                    return;
                }
            }
            if let Some(brush) = app.brush_area {
                if contains(brush, mouse.column, mouse.row) {
                    app.brush_anchor = brush_index(brush, mouse.column, len);
                }
            }
        }

        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(chart) = app.chart_area {
                app.zoom.mouse_move(mouse.column, chart.x, chart.width, len);
            }
            if let (Some(brush), Some(anchor)) = (app.brush_area, app.brush_anchor) {
                if let Some(index) = brush_index(brush, mouse.column, len) {
                    app.zoom.brush_to(anchor, index, len);
                }
            }
        }

        MouseEventKind::Up(MouseButton::Left) => {
            // Releasing anywhere finishes a drag, including off the chart.
            app.zoom.mouse_up();
            app.brush_anchor = None;
        }

        _ => {}
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

/// Map a column on the brush bar to an index over the full series.
fn brush_index(brush: Rect, column: u16, len: usize) -> Option<usize> {
    if brush.width == 0 || len == 0 {
        return None;
    }
    if column < brush.x || column >= brush.x + brush.width {
        return None;
    }
    let relative = (column - brush.x) as usize;
    Some((relative * len / brush.width as usize).min(len - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FormField;
    use crate::clock::test_support::FixedClock;
    use crate::fetch::{FetchOutcome, Fetcher, SimulationRequest};

    #[derive(Default)]
    struct NoopFetcher;

    impl Fetcher for NoopFetcher {
        fn start(&mut self, _request: SimulationRequest) -> Result<()> {
            Ok(())
        }

        fn poll(&mut self) -> Option<FetchOutcome> {
            None
        }

        fn in_flight(&self) -> bool {
            false
        }

        fn description(&self) -> &str {
            "noop"
        }
    }

    fn test_app() -> App {
        App::new(
            Box::new(NoopFetcher),
            Box::new(FixedClock("2024-06-15".parse().unwrap())),
        )
    }

    #[test]
    fn q_quits() {
        let mut app = test_app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn form_input_captures_characters() {
        let mut app = test_app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('e')));
        assert!(app.form.active);

        for c in "Oslo".chars() {
            handle_key_event(&mut app, KeyEvent::from(KeyCode::Char(c)));
        }
        assert_eq!(app.form.city, "Oslo");

        handle_key_event(&mut app, KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.form.city, "Osl");
    }

    #[test]
    fn tab_cycles_form_fields_while_editing() {
        let mut app = test_app();
        app.start_form_edit();
        assert_eq!(app.form.focus, FormField::City);

        handle_key_event(&mut app, KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.form.focus, FormField::StartDate);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::BackTab));
        assert_eq!(app.form.focus, FormField::City);
    }

    #[test]
    fn help_overlay_swallows_the_next_key() {
        let mut app = test_app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('q')));
        assert!(app.show_help == false && app.running);
    }

    #[test]
    fn brush_index_maps_full_width_to_full_series() {
        let brush = Rect::new(0, 20, 100, 1);
        assert_eq!(brush_index(brush, 0, 200), Some(0));
        assert_eq!(brush_index(brush, 99, 200), Some(198));
        assert_eq!(brush_index(brush, 100, 200), None);
    }
}
