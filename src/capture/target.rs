//! What to capture.

use super::error::CaptureError;
use super::geometry::Rect;

/// A resolved capture request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureTarget<H> {
    /// The whole currently focused top-level window.
    FocusedWindow,
    /// The full extent of a window or sub-element.
    Region(H),
    /// A rectangle positioned relative to a region's origin.
    RegionRect(H, Rect),
    /// A literal top-left-origin screen rectangle, used without translation.
    Absolute(Rect),
}

/// One loosely typed capture argument.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureArg<H> {
    Handle(H),
    Numbers(Vec<f64>),
}

impl<H: Copy> CaptureTarget<H> {
    /// Interprets an argument list of up to two entries.
    ///
    /// Accepted shapes are `()`, `(handle)`, `([x, y, w, h])` and
    /// `(handle, [x, y, w, h])`.
    pub fn from_args(args: &[CaptureArg<H>]) -> Result<Self, CaptureError> {
        match args {
            [] => Ok(Self::FocusedWindow),
            [CaptureArg::Handle(h)] => Ok(Self::Region(*h)),
            [CaptureArg::Numbers(values)] => Rect::from_slice(values).map(Self::Absolute),
            [CaptureArg::Handle(h), CaptureArg::Numbers(values)] => {
                Rect::from_slice(values).map(|rect| Self::RegionRect(*h, rect))
            }
            [_, _] => Err(CaptureError::InvalidArgument(
                "expected a region handle followed by a 4-number rectangle".to_string(),
            )),
            _ => Err(CaptureError::TooManyArguments(args.len())),
        }
    }
}
