//! Review capture session: cycles the host through its plot views and saves
//! a screenshot plus the exported table for each one.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::automation::config::ReviewConfig;
use crate::automation::host::HostApplication;
use crate::automation::load_name::normalize_load_name;
use crate::automation::views::{resolve_views, PlotView};
use crate::capture::{CaptureTarget, ScreenCapturer, ScreenGrabber, Toolkit};

/// Files written for one view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewOutput {
    pub short_name: &'static str,
    pub image_path: PathBuf,
    pub data_path: PathBuf,
}

/// One pass over the configured views for a single load.
#[derive(Debug)]
pub struct ReviewSession {
    load_name: String,
    output_dir: PathBuf,
    views: Vec<&'static PlotView>,
    settle_delay: Duration,
}

impl ReviewSession {
    /// Creates a session for `load_name` writing into `output_dir`.
    ///
    /// Fails when the load name is malformed or a configured view is unknown.
    pub fn new(load_name: &str, output_dir: &Path, config: &ReviewConfig) -> Result<Self> {
        let load_name = normalize_load_name(load_name)?;
        let views = resolve_views(config.views.as_deref())?;
        Ok(Self {
            load_name,
            output_dir: output_dir.to_path_buf(),
            views,
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        })
    }

    pub fn load_name(&self) -> &str {
        &self.load_name
    }

    pub fn views(&self) -> &[&'static PlotView] {
        &self.views
    }

    /// Runs the session. Stops at the first failing view.
    pub fn run<H, T, G>(
        &self,
        host: &mut H,
        capturer: &ScreenCapturer<T, G>,
    ) -> Result<Vec<ViewOutput>>
    where
        H: HostApplication<Handle = T::Handle>,
        T: Toolkit,
        G: ScreenGrabber,
    {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        info!(
            "Starting review capture for {}: {} views into {}",
            self.load_name,
            self.views.len(),
            self.output_dir.display()
        );

        let mut outputs = Vec::with_capacity(self.views.len());
        for (index, view) in self.views.iter().enumerate() {
            info!(
                "View {}/{}: {} ({})",
                index + 1,
                self.views.len(),
                view.short_name,
                view.title
            );
            let output = self
                .capture_view(host, capturer, view)
                .with_context(|| format!("View \"{}\" failed", view.short_name))?;
            outputs.push(output);
        }

        info!("Review capture complete: {} views", outputs.len());
        Ok(outputs)
    }

    fn capture_view<H, T, G>(
        &self,
        host: &mut H,
        capturer: &ScreenCapturer<T, G>,
        view: &'static PlotView,
    ) -> Result<ViewOutput>
    where
        H: HostApplication<Handle = T::Handle>,
        T: Toolkit,
        G: ScreenGrabber,
    {
        host.select_view(view).context("Failed to select view")?;
        let exported = host
            .run_export(view, &self.load_name)
            .context("Export failed")?;

        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        let (image, _) = capturer.capture(CaptureTarget::Region(host.window()))?;

        let image_path = self.output_dir.join(view.image_file_name(&self.load_name));
        image
            .into_rgb_image()?
            .save(&image_path)
            .with_context(|| format!("Failed to save image: {}", image_path.display()))?;
        info!("Saved {}", image_path.display());

        let data_path = self.output_dir.join(view.data_file_name(&self.load_name));
        fs::write(&data_path, exported)
            .with_context(|| format!("Failed to write data: {}", data_path.display()))?;
        info!("Saved {}", data_path.display());

        Ok(ViewOutput {
            short_name: view.short_name,
            image_path,
            data_path,
        })
    }
}
