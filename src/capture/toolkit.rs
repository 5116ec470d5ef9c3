//! Collaborator traits for the capturer.
//!
//! `Toolkit` is the windowing side: display layout, region units and positions,
//! region classification, and raising a window. `ScreenGrabber` is the platform
//! capture facility that turns a top-left pixel rectangle into packed pixels.

use anyhow::Result;
use std::fmt::Debug;

use super::error::CaptureError;
use super::geometry::{PixelRect, Rect};

/// Measurement unit a region reports its position in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Pixels,
    /// 1/72 inch.
    Points,
    /// Fractions of the parent container's extent.
    Normalized,
}

/// What kind of container a sub-element sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentKind {
    /// Directly inside the top-level window.
    Window,
    /// Inside a bordered panel or other non-window container.
    Panel,
}

/// Classification of a region handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind<H> {
    /// The handle is a top-level window.
    Window,
    /// The handle is a sub-element of `window`.
    Element { window: H, parent: ParentKind },
    /// Neither a window nor a descendant of one.
    Unknown,
}

/// Windowing toolkit queried by the capturer.
///
/// Positions are in a bottom-left-origin coordinate system: a region's
/// position is relative to its immediate parent, a window's position is
/// relative to the virtual desktop origin.
pub trait Toolkit {
    type Handle: Copy + Eq + Debug;

    /// Monitor rectangles in virtual desktop space.
    fn monitors(&self) -> Result<Vec<Rect>>;

    /// The currently focused top-level window, if any.
    fn focused_window(&self) -> Option<Self::Handle>;

    fn classify(&self, handle: Self::Handle) -> RegionKind<Self::Handle>;

    fn units(&self, handle: Self::Handle) -> Units;

    fn set_units(&self, handle: Self::Handle, units: Units) -> Result<()>;

    /// Position and size of `handle`, in its current units.
    fn position(&self, handle: Self::Handle) -> Result<Rect>;

    /// Brings `window` above all others and flushes pending redraws.
    fn raise_and_flush(&self, window: Self::Handle) -> Result<()>;
}

/// Packed pixels for a captured rectangle, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<i32>,
}

/// Platform screen capture facility.
pub trait ScreenGrabber {
    fn grab(&self, rect: PixelRect) -> Result<PackedFrame>;
}

/// Switches a region to another unit and switches it back on drop.
///
/// Restoring on drop covers every exit path, including an early return
/// from a failed position read.
pub struct UnitGuard<'a, T: Toolkit> {
    toolkit: &'a T,
    handle: T::Handle,
    previous: Units,
}

impl<'a, T: Toolkit> UnitGuard<'a, T> {
    pub fn switch(toolkit: &'a T, handle: T::Handle, units: Units) -> Result<Self, CaptureError> {
        let previous = toolkit.units(handle);
        toolkit
            .set_units(handle, units)
            .map_err(CaptureError::PositionQuery)?;
        Ok(Self {
            toolkit,
            handle,
            previous,
        })
    }
}

impl<T: Toolkit> Drop for UnitGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.toolkit.set_units(self.handle, self.previous) {
            log::warn!(
                "Failed to restore units of {:?} to {:?}: {:#}",
                self.handle,
                self.previous,
                e
            );
        }
    }
}

/// Reads the position of `handle` in pixel units, leaving its unit unchanged.
pub fn pixel_position<T: Toolkit>(toolkit: &T, handle: T::Handle) -> Result<Rect, CaptureError> {
    let _guard = UnitGuard::switch(toolkit, handle, Units::Pixels)?;
    toolkit
        .position(handle)
        .map_err(CaptureError::PositionQuery)
}
