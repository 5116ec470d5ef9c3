//! Load Review Capture
//!
//! Command line front end: captures the review host's plot views and builds
//! the load review reports.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::{Path, PathBuf};

use load_review_capture::analysis::{
    publish_to_parent, write_ending_configuration_file, write_thermal_report_file,
};
use load_review_capture::automation::{normalize_load_name, resolve_views, ReviewConfig};
use load_review_capture::capture::Rect;
use load_review_capture::{logging, paths};

#[derive(Parser)]
#[command(name = "load-review-capture")]
#[command(about = "Capture thermal model review plots and build load review reports")]
#[command(version)]
struct Cli {
    /// Path to config.json (defaults to the one next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cycle the host through its plot views, saving a screenshot and data table for each
    Capture {
        /// Load name, e.g. MAY0712A
        #[arg(long)]
        load: String,

        /// Output directory (defaults to <exe_dir>/output/<load>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated view short names (defaults to the plot order)
        #[arg(long, value_delimiter = ',')]
        views: Option<Vec<String>>,
    },

    /// Capture a literal screen rectangle (top-left origin) to a PNG file
    Grab {
        /// Screen rectangle as x,y,w,h
        #[arg(long, value_parser = parse_rect)]
        rect: Rect,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write <prop>_Ending_Configuration.txt from the propagation tables
    EndingConfig {
        /// Propagation schedule load name
        #[arg(long)]
        prop: String,

        /// Directory holding the exported tables
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Write <review>_Thermal_Load_Review_Report.txt comparing both schedules
    ThermalReport {
        /// Propagation schedule load name
        #[arg(long)]
        prop: String,

        /// Reviewed schedule load name
        #[arg(long)]
        review: String,

        /// Directory holding the exported tables
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Hard-link every <review>* file into the parent directory
    Publish {
        /// Reviewed schedule load name
        #[arg(long)]
        review: String,

        /// Directory holding the review outputs
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid number \"{}\"", part))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    Rect::from_slice(&values).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: failed to create logs directory: {}", e);
    }
    logging::init(&paths::get_logs_dir());

    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        error!("[PANIC]{} {}", location, panic_info);
    }));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ReviewConfig::load(cli.config.as_deref());

    match cli.command {
        Command::Capture {
            load,
            output,
            views,
        } => {
            if views.is_some() {
                config.views = views;
            }
            let load = normalize_load_name(&load)?;
            let output = output.unwrap_or_else(|| paths::get_output_dir(&load));
            run_capture(&config, &load, &output)
        }
        Command::Grab { rect, output } => run_grab(&config, rect, &output),
        Command::EndingConfig { prop, dir } => {
            let prop = normalize_load_name(&prop)?;
            let views = resolve_views(config.views.as_deref())?;
            write_ending_configuration_file(&dir, &prop, &views)?;
            Ok(())
        }
        Command::ThermalReport { prop, review, dir } => {
            let prop = normalize_load_name(&prop)?;
            let review = normalize_load_name(&review)?;
            let views = resolve_views(config.views.as_deref())?;
            write_thermal_report_file(&dir, &prop, &review, &views)?;
            Ok(())
        }
        Command::Publish { review, dir } => {
            let review = normalize_load_name(&review)?;
            let published = publish_to_parent(&dir, &review)?;
            info!("Published {} files", published.len());
            Ok(())
        }
    }
}

#[cfg(windows)]
fn run_capture(config: &ReviewConfig, load: &str, output: &Path) -> Result<()> {
    use load_review_capture::automation::win32_host::Win32Host;
    use load_review_capture::automation::ReviewSession;
    use load_review_capture::capture::gdi::GdiGrabber;
    use load_review_capture::capture::win32::Win32Toolkit;
    use load_review_capture::capture::ScreenCapturer;

    let session = ReviewSession::new(load, output, config)?;
    let mut host = Win32Host::connect(config)?;
    let capturer = ScreenCapturer::new(Win32Toolkit::new(), GdiGrabber)
        .with_corrections(config.corrections());

    let outputs = session.run(&mut host, &capturer)?;
    info!(
        "Captured {} views for {} into {}",
        outputs.len(),
        session.load_name(),
        output.display()
    );
    Ok(())
}

#[cfg(not(windows))]
fn run_capture(_config: &ReviewConfig, _load: &str, _output: &Path) -> Result<()> {
    Err(anyhow!("Review capture requires Windows"))
}

#[cfg(windows)]
fn run_grab(config: &ReviewConfig, rect: Rect, output: &Path) -> Result<()> {
    use anyhow::Context;
    use load_review_capture::capture::gdi::GdiGrabber;
    use load_review_capture::capture::win32::Win32Toolkit;
    use load_review_capture::capture::{CaptureTarget, ScreenCapturer};

    let capturer = ScreenCapturer::new(Win32Toolkit::new(), GdiGrabber)
        .with_corrections(config.corrections());
    let (image, _) = capturer.capture(CaptureTarget::Absolute(rect))?;
    image
        .into_rgb_image()?
        .save(output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    info!("Saved {}", output.display());
    Ok(())
}

#[cfg(not(windows))]
fn run_grab(_config: &ReviewConfig, _rect: Rect, _output: &Path) -> Result<()> {
    Err(anyhow!("Screen capture requires Windows"))
}
