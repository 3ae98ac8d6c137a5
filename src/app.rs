//! Application state and interaction logic.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::{Days, NaiveDate};
use ratatui::layout::Rect;

use crate::clock::Clock;
use crate::data::{format_series, stats, SeriesData, Statistics, ZoomController};
use crate::fetch::{Fetcher, SimulationRequest};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Line chart of both channels with zoom and brush.
    Chart,
    /// Per-channel summary statistics.
    Stats,
    /// Raw data table over the zoomed window.
    Table,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Chart => View::Stats,
            View::Stats => View::Table,
            View::Table => View::Chart,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Chart => View::Table,
            View::Stats => View::Chart,
            View::Table => View::Stats,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Chart => "Graph",
            View::Stats => "Statistics",
            View::Table => "Raw Data",
        }
    }
}

/// Which form field currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    City,
    StartDate,
    EndDate,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::City => FormField::StartDate,
            FormField::StartDate => FormField::EndDate,
            FormField::EndDate => FormField::City,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::City => FormField::EndDate,
            FormField::StartDate => FormField::City,
            FormField::EndDate => FormField::StartDate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::City => "City",
            FormField::StartDate => "Start",
            FormField::EndDate => "End",
        }
    }
}

/// Query form state: city and date range as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub focus: FormField,
    /// Whether keystrokes are being captured as form input.
    pub active: bool,
}

impl FormState {
    pub fn focused_value(&self) -> &str {
        match self.focus {
            FormField::City => &self.city,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
        }
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::City => &mut self.city,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
        }
    }
}

/// Date-range presets applied from the injected clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Last24Hours,
    Last7Days,
    Last30Days,
}

impl Preset {
    fn days(self) -> u64 {
        match self {
            Preset::Last24Hours => 1,
            Preset::Last7Days => 7,
            Preset::Last30Days => 30,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data acquisition
    fetcher: Box<dyn Fetcher>,
    clock: Box<dyn Clock>,
    pub last_query: Option<SimulationRequest>,

    // Form
    pub form: FormState,
    pub form_error: Option<String>,

    // Derived data, recomputed in full on every fetch
    pub series: Option<SeriesData>,
    pub stats: Option<Statistics>,
    pub zoom: ZoomController,
    pub load_error: Option<String>,

    // Table scroll position
    pub table_offset: usize,

    // Chart layout recorded during rendering, for mouse mapping
    pub chart_area: Option<Rect>,
    pub brush_area: Option<Rect>,
    pub brush_anchor: Option<usize>,

    // UI
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given fetcher and clock.
    ///
    /// The form defaults to the last 7 days, as the original dashboard did.
    pub fn new(fetcher: Box<dyn Fetcher>, clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        let week_ago = today - Days::new(7);

        Self {
            running: true,
            current_view: View::Chart,
            show_help: false,
            fetcher,
            clock,
            last_query: None,
            form: FormState {
                start_date: week_ago.to_string(),
                end_date: today.to_string(),
                ..FormState::default()
            },
            form_error: None,
            series: None,
            stats: None,
            zoom: ZoomController::new(),
            load_error: None,
            table_offset: 0,
            chart_area: None,
            brush_area: None,
            brush_anchor: None,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the configured API endpoint.
    pub fn source_description(&self) -> &str {
        self.fetcher.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter form input mode (starts capturing keystrokes).
    pub fn start_form_edit(&mut self) {
        self.form.active = true;
    }

    /// Exit form input mode without submitting.
    pub fn cancel_form_edit(&mut self) {
        self.form.active = false;
    }

    /// Move focus to the next form field.
    pub fn focus_next_field(&mut self) {
        self.form.focus = self.form.focus.next();
    }

    /// Move focus to the previous form field.
    pub fn focus_prev_field(&mut self) {
        self.form.focus = self.form.focus.prev();
    }

    /// Append a character to the focused form field.
    pub fn form_push(&mut self, c: char) {
        self.form.focused_value_mut().push(c);
    }

    /// Remove the last character from the focused form field.
    pub fn form_pop(&mut self) {
        self.form.focused_value_mut().pop();
    }

    /// Fill the date fields from a preset relative to the injected clock.
    pub fn apply_preset(&mut self, preset: Preset) {
        let today = self.clock.today();
        let start = today - Days::new(preset.days());
        self.form.start_date = start.to_string();
        self.form.end_date = today.to_string();
        self.form_error = None;
    }

    /// Whether a fetch is currently outstanding (submission is disabled).
    pub fn is_loading(&self) -> bool {
        self.fetcher.in_flight()
    }

    /// Validate the form and start a fetch.
    ///
    /// Validation failures are surfaced inline via `form_error` and no
    /// request is made. Ignored while a fetch is already in flight.
    pub fn submit(&mut self) {
        if self.is_loading() {
            return;
        }
        self.form_error = None;

        let city = self.form.city.trim().to_string();
        if city.is_empty() {
            self.form_error = Some("Please enter a city".to_string());
            return;
        }
        if self.form.start_date.trim().is_empty() {
            self.form_error = Some("Please enter a start date".to_string());
            return;
        }
        if self.form.end_date.trim().is_empty() {
            self.form_error = Some("Please enter an end date".to_string());
            return;
        }

        let parsed_start = self.form.start_date.trim().parse::<NaiveDate>();
        let parsed_end = self.form.end_date.trim().parse::<NaiveDate>();
        let (start_date, end_date) = match (parsed_start, parsed_end) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                self.form_error = Some("Please enter valid dates".to_string());
                return;
            }
        };
        if end_date < start_date {
            self.form_error = Some("End date must be after start date".to_string());
            return;
        }

        let span_days = (end_date - start_date).num_days();
        if span_days > 30 {
            self.set_status_message(format!(
                "Large range selected ({} days); this might be slow to load",
                span_days
            ));
        }

        let request = SimulationRequest {
            city,
            start_date,
            end_date,
        };
        if let Err(e) = self.fetcher.start(request.clone()) {
            self.load_error = Some(e.to_string());
            return;
        }
        self.last_query = Some(request);
        self.form.active = false;
    }

    /// Poll the fetcher for a settled outcome and fold it into state.
    ///
    /// Returns true if the outcome changed the displayed data.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(outcome) = self.fetcher.poll() else {
            return false;
        };

        match outcome {
            Ok(raw) => {
                let series = format_series(raw);
                self.stats = stats::compute(&series.points);
                self.series = Some(series);
                self.load_error = None;
            }
            Err(e) => {
                // Errors are terminal for the submission; never leave a
                // stale series on screen.
                self.series = None;
                self.stats = None;
                self.load_error = Some(format!("Failed to fetch temperature data: {}", e));
            }
        }
        self.zoom.reset();
        self.table_offset = 0;
        true
    }

    /// Length of the full sorted series (0 when nothing is loaded).
    pub fn series_len(&self) -> usize {
        self.series.as_ref().map_or(0, |s| s.len())
    }

    /// Apply the zoom-in command at the current series length.
    pub fn zoom_in(&mut self) {
        let len = self.series_len();
        self.zoom.zoom_in(len);
        self.table_offset = 0;
    }

    /// Apply the zoom-out command at the current series length.
    pub fn zoom_out(&mut self) {
        let len = self.series_len();
        self.zoom.zoom_out(len);
        self.table_offset = 0;
    }

    /// Clear zoom and selection.
    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
        self.table_offset = 0;
    }

    /// Scroll the raw data table, clamped to the displayed window.
    pub fn scroll_table(&mut self, delta: isize) {
        let visible = self
            .series
            .as_ref()
            .map_or(0, |s| self.zoom.displayed(&s.points).len());
        let max = visible.saturating_sub(1);
        let next = self.table_offset as isize + delta;
        self.table_offset = next.clamp(0, max as isize) as usize;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current query, series and stats to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        let Some(ref series) = self.series else {
            anyhow::bail!("No data to export");
        };

        let mut export = serde_json::Map::new();

        if let Some(ref query) = self.last_query {
            export.insert(
                "query".to_string(),
                serde_json::json!({
                    "city": query.city,
                    "start_date": query.start_date.to_string(),
                    "end_date": query.end_date.to_string(),
                }),
            );
        }

        export.insert("day_count".to_string(), serde_json::json!(series.day_count));

        if let Some(stats) = self.stats {
            let channel = |c: crate::data::ChannelStats| {
                serde_json::json!({
                    "min": c.min,
                    "max": c.max,
                    "avg": c.avg,
                    "current": c.current,
                })
            };
            export.insert(
                "stats".to_string(),
                serde_json::json!({
                    "internal": channel(stats.internal),
                    "external": channel(stats.external),
                }),
            );
        }

        let points: Vec<serde_json::Value> = series
            .points
            .iter()
            .map(|p| {
                serde_json::json!({
                    "timestamp": p.timestamp,
                    "label": p.display_label,
                    "internal_c": p.internal_temp_c,
                    "external_c": p.external_temp_c,
                })
            })
            .collect();
        export.insert("points".to_string(), serde_json::Value::Array(points));

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}
