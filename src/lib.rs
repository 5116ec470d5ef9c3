//! Load Review Capture
//!
//! Drives a thermal-model review application through its predefined plot
//! views, capturing a screenshot and the exported data table for each, and
//! builds the load review reports from those tables.

pub mod analysis;
pub mod automation;
pub mod capture;
pub mod logging;
pub mod paths;
