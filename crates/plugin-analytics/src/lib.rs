//! # plugin-analytics
//!
//! Counts requests per route via collected middleware and serves the
//! totals on `GET /api/analytics`. The counters are owned by the plugin
//! instance and injected into its middleware and route closures — no
//! ambient shared state.

pub mod plugin;
pub mod stats;

pub use plugin::AnalyticsPlugin;
pub use stats::{AnalyticsSnapshot, AnalyticsStats};
