//! Screen region capture.
//!
//! This module provides:
//! - Capture target parsing (`CaptureTarget`, `CaptureArg`)
//! - Coordinate resolution across monitors (`ScreenCapturer::resolve`)
//! - Packed pixel decoding (`CapturedImage`)
//! - The Win32 toolkit and GDI grabber (Windows only)

pub mod capturer;
pub mod error;
pub mod geometry;
pub mod pixels;
pub mod target;
pub mod toolkit;

#[cfg(windows)]
pub mod gdi;
#[cfg(windows)]
pub mod win32;
#[cfg(windows)]
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use capturer::{Corrections, Resolved, ScreenCapturer};
pub use error::CaptureError;
pub use geometry::{PixelRect, Rect};
pub use pixels::{CapturedImage, ColorTable};
pub use target::{CaptureArg, CaptureTarget};
pub use toolkit::{PackedFrame, ParentKind, RegionKind, ScreenGrabber, Toolkit, Units};
