//! # Wayne Enterprises BI Dashboard
//!
//! `bi_dashboard` loads business metrics from the Wayne Enterprises metrics
//! API and renders them as an interactive dashboard.
//!
//! ## Features
//!
//! - Typed client for the six dashboard resources
//! - Concurrent snapshot loading that fails as a whole
//! - Loading, success and error states with retry
//! - Pure aggregation and en-US formatting helpers
//! - Bar, line and pie charts rendered with plotters
//!
//! ## Example
//!
//! ```
//! use bi_dashboard::utils::{format_currency, mean, sum};
//!
//! let revenue = [1.5, 2.0];
//! let total = sum(&revenue, |r| *r);
//!
//! assert_eq!(format_currency(total), "$3,500,000");
//! assert_eq!(mean(&revenue, |r| *r), Some(1.75));
//! assert_eq!(mean(&[] as &[f64], |r| *r), None);
//! ```

pub mod analysis;
pub mod api;
pub mod app;
pub mod config;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::DashboardView;
pub use api::{ApiClient, ApiError};
pub use app::{App as DashboardApp, Dashboard, LoadState};
pub use config::DashboardConfig;
pub use types::Snapshot;
