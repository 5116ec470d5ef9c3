//! The review host application as seen by a capture session.

use anyhow::Result;

use crate::automation::views::PlotView;

/// A running host application that shows one plot view at a time and can
/// export the current view's data table.
pub trait HostApplication {
    type Handle: Copy;

    /// The host's top-level window.
    fn window(&self) -> Self::Handle;

    /// Switches the host's view selector to `view`.
    fn select_view(&mut self, view: &PlotView) -> Result<()>;

    /// Runs the host's export for the current view and returns the exported
    /// table as text.
    fn run_export(&mut self, view: &PlotView, load_name: &str) -> Result<String>;
}
