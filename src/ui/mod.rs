//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`chart`]: Line chart of both channels with zoom selection and brush bar
//! - [`stats`]: Per-channel statistics cards
//! - [`table`]: Raw data table over the zoomed window
//! - [`form`]: City/date-range input panel
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering architecture
//!
//! The main loop calls [`render`] every frame:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Query form (form::render)            │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │ View content                         │
//! │ (chart/stats/table::render)          │
//! ├──────────────────────────────────────┤
//! │ Status bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Help overlay rendered on top (common::render_help)
//! ```

pub mod chart;
pub mod common;
pub mod form;
pub mod stats;
pub mod table;
pub mod theme;

pub use theme::Theme;

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::app::{App, View};

/// Render one full frame.
///
/// The chart renderer records its layout rects on the app for mouse mapping;
/// they are cleared first so stale rects never receive events when another
/// view is active.
pub fn render(frame: &mut Frame, app: &mut App) {
    app.chart_area = None;
    app.brush_area = None;

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(4), // Query form
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

    common::render_header(frame, app, chunks[0]);
    form::render(frame, app, chunks[1]);
    common::render_tabs(frame, app, chunks[2]);

    match app.current_view {
        View::Chart => chart::render(frame, app, chunks[3]),
        View::Stats => stats::render(frame, app, chunks[3]),
        View::Table => table::render(frame, app, chunks[3]),
    }

    common::render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        common::render_help(frame, app, frame.area());
    }
}
