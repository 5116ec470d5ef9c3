//! Load review reports built from the host's exported plot tables.
//!
//! This module provides:
//! - Plot table reading (text and numeric columns)
//! - The propagation ending configuration
//! - The thermal load review report
//! - Publishing review outputs to the parent directory

pub mod plot_data;
pub mod publish;
pub mod report;

pub use plot_data::{ColumnData, PlotTable};
pub use publish::{force_link, publish_to_parent};
pub use report::{write_ending_configuration_file, write_thermal_report_file};
