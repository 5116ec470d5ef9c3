//! Review capture automation.
//!
//! This module provides:
//! - The plot view catalogue and default plot order
//! - Load name validation
//! - Session configuration (config.json)
//! - The capture session loop over a `HostApplication`
//! - Waiting for an exported table to settle
//! - The Win32 host adapter (Windows only)

pub mod config;
pub mod error;
pub mod export_wait;
pub mod host;
pub mod load_name;
pub mod runner;
pub mod views;

#[cfg(windows)]
pub mod win32_host;

pub use config::ReviewConfig;
pub use error::ReviewError;
pub use export_wait::wait_for_export;
pub use host::HostApplication;
pub use load_name::normalize_load_name;
pub use runner::{ReviewSession, ViewOutput};
pub use views::{find_view, resolve_views, PlotView, PLOT_ORDER, VIEWS};
