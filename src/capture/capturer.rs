//! Screen region capturer.
//!
//! Resolves a capture target to an absolute top-left-origin pixel rectangle,
//! raises the owning window, grabs the pixels and decodes them.

use log::debug;

use super::error::CaptureError;
use super::geometry::{max_height, PixelRect, Rect};
use super::pixels::{CapturedImage, ColorTable};
use super::target::{CaptureArg, CaptureTarget};
use super::toolkit::{
    pixel_position, PackedFrame, ParentKind, RegionKind, ScreenGrabber, Toolkit,
};

/// Empirical pixel corrections for window chrome and panel borders.
///
/// Both depend on the platform and theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corrections {
    /// Subtracted from x and added to y of every region capture.
    pub chrome: f64,
    /// Added to both origin components of a region nested in a panel.
    pub panel_border: f64,
}

impl Default for Corrections {
    fn default() -> Self {
        Self {
            chrome: 3.0,
            panel_border: 1.0,
        }
    }
}

/// Result of coordinate resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved<H> {
    /// Absolute capture rectangle.
    pub rect: PixelRect,
    /// Window to raise before capturing. `None` for absolute rectangles.
    pub window: Option<H>,
    /// Region origin inside its window, after the panel correction.
    pub region_origin: (f64, f64),
}

pub struct ScreenCapturer<T, G> {
    toolkit: T,
    grabber: G,
    corrections: Corrections,
}

impl<T: Toolkit, G: ScreenGrabber> ScreenCapturer<T, G> {
    pub fn new(toolkit: T, grabber: G) -> Self {
        Self {
            toolkit,
            grabber,
            corrections: Corrections::default(),
        }
    }

    pub fn with_corrections(mut self, corrections: Corrections) -> Self {
        self.corrections = corrections;
        self
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn grabber(&self) -> &G {
        &self.grabber
    }

    /// Captures from a loosely typed argument list.
    ///
    /// See [`CaptureTarget::from_args`] for the accepted shapes.
    pub fn capture_args(
        &self,
        args: &[CaptureArg<T::Handle>],
    ) -> Result<(CapturedImage, ColorTable), CaptureError> {
        self.capture(CaptureTarget::from_args(args)?)
    }

    /// Captures `target` and returns the image with an empty colour table.
    pub fn capture(
        &self,
        target: CaptureTarget<T::Handle>,
    ) -> Result<(CapturedImage, ColorTable), CaptureError> {
        let resolved = self.resolve(target)?;
        if resolved.rect.is_empty() {
            debug!("Nothing to capture in {:?}", resolved.rect);
            let frame = PackedFrame {
                width: resolved.rect.width,
                height: resolved.rect.height,
                pixels: Vec::new(),
            };
            let image = CapturedImage::from_packed(&frame).map_err(CaptureError::Grab)?;
            return Ok((image, ColorTable::new()));
        }
        debug!("Capturing {:?}", resolved.rect);

        if let Some(window) = resolved.window {
            self.toolkit
                .raise_and_flush(window)
                .map_err(CaptureError::Raise)?;
        }

        let frame = self
            .grabber
            .grab(resolved.rect)
            .map_err(CaptureError::Grab)?;
        let image = CapturedImage::from_packed(&frame).map_err(CaptureError::Grab)?;

        Ok((image, ColorTable::new()))
    }

    /// Computes the capture rectangle for `target` without capturing.
    pub fn resolve(
        &self,
        target: CaptureTarget<T::Handle>,
    ) -> Result<Resolved<T::Handle>, CaptureError> {
        match target {
            CaptureTarget::Absolute(rect) => Ok(Resolved {
                rect: PixelRect::floor(rect.x, rect.y, rect.width, rect.height),
                window: None,
                region_origin: (0.0, 0.0),
            }),
            CaptureTarget::FocusedWindow => {
                let window = self.toolkit.focused_window().ok_or_else(|| {
                    CaptureError::InvalidArgument("no focused window to capture".to_string())
                })?;
                self.resolve_region(window, None)
            }
            CaptureTarget::Region(handle) => self.resolve_region(handle, None),
            CaptureTarget::RegionRect(handle, rect) => self.resolve_region(handle, Some(rect)),
        }
    }

    fn resolve_region(
        &self,
        handle: T::Handle,
        requested: Option<Rect>,
    ) -> Result<Resolved<T::Handle>, CaptureError> {
        let (window, parent) = match self.toolkit.classify(handle) {
            RegionKind::Window => (handle, None),
            RegionKind::Element { window, parent } => (window, Some(parent)),
            RegionKind::Unknown => {
                return Err(CaptureError::InvalidArgument(format!(
                    "{:?} is neither a window nor an element of one",
                    handle
                )));
            }
        };

        let region = pixel_position(&self.toolkit, handle)?;
        let window_pos = if window == handle {
            region
        } else {
            pixel_position(&self.toolkit, window)?
        };

        let region_origin = match parent {
            // A window is its own frame of reference.
            None => (0.0, 0.0),
            Some(ParentKind::Window) => (region.x, region.y),
            Some(ParentKind::Panel) => (
                region.x + self.corrections.panel_border,
                region.y + self.corrections.panel_border,
            ),
        };

        let rect = requested.unwrap_or_else(|| region.at_origin());

        let monitors = self.toolkit.monitors().map_err(CaptureError::Layout)?;
        let max_height = max_height(&monitors).ok_or(CaptureError::NoDisplays)?;

        let chrome = self.corrections.chrome;
        let x = window_pos.x + region_origin.0 + rect.x - chrome;
        let y = max_height - window_pos.y - region_origin.1 - rect.y - rect.height + chrome;

        Ok(Resolved {
            rect: PixelRect::floor(x, y, rect.width, rect.height),
            window: Some(window),
            region_origin,
        })
    }
}
