//! Data models and processing for temperature series.
//!
//! ## Submodules
//!
//! - [`series`]: raw API points → sorted, display-ready [`SeriesData`]
//! - [`stats`]: per-channel min/max/avg/current aggregation
//! - [`zoom`]: the zoom/pan view controller over the sorted series
//!
//! ## Data flow
//!
//! ```text
//! Vec<RawPoint> (wire)
//!       │
//!       ▼
//! series::format_series()
//!       │
//!       ├──▶ stats::compute()          (full series, never zoomed)
//!       │
//!       └──▶ ZoomController::displayed() ──▶ chart / table renderers
//! ```

pub mod series;
pub mod stats;
pub mod zoom;

pub use series::{format_series, FormattedPoint, SeriesData};
pub use stats::{celsius_to_fahrenheit, ChannelStats, Statistics};
pub use zoom::{tick_interval, ZoomController, ZoomPhase, ZoomRange};
