//! Rectangles and display layout.
//!
//! Toolkit rectangles (`Rect`) use a bottom-left origin and may carry fractional
//! values. Capture rectangles (`PixelRect`) use the top-left origin of the
//! screen capture facility and are whole pixels.

use super::error::CaptureError;

/// A rectangle as reported by the windowing toolkit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from a `[x, y, width, height]` slice.
    ///
    /// The slice must hold exactly four finite values.
    pub fn from_slice(values: &[f64]) -> Result<Self, CaptureError> {
        let [x, y, width, height] = values else {
            return Err(CaptureError::InvalidArgument(format!(
                "a rectangle needs 4 numbers, got {}",
                values.len()
            )));
        };
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(CaptureError::InvalidArgument(format!(
                "rectangle values must be finite, got {}",
                bad
            )));
        }
        Ok(Self::new(*x, *y, *width, *height))
    }

    /// Same size, origin moved to (0, 0).
    pub fn at_origin(&self) -> Self {
        Self::new(0.0, 0.0, self.width, self.height)
    }

    /// Top edge in a bottom-left coordinate system.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// An absolute capture rectangle in top-left-origin screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Floors the origin and the size. Negative sizes clamp to zero.
    pub fn floor(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
            width: floor_extent(width),
            height: floor_extent(height),
        }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn floor_extent(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.floor() as u32
    }
}

/// Largest vertical extent among the connected monitors.
///
/// Anchors the top-left capture coordinate system against the toolkit's
/// bottom-left convention. Returns `None` for an empty layout.
pub fn max_height(monitors: &[Rect]) -> Option<f64> {
    monitors
        .iter()
        .map(|m| m.height)
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_slice_requires_four_values() {
        assert_eq!(
            Rect::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            Rect::new(1.0, 2.0, 3.0, 4.0)
        );
        assert!(Rect::from_slice(&[1.0, 2.0, 3.0]).is_err());
        assert!(Rect::from_slice(&[]).is_err());
        assert!(Rect::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_err());
    }

    #[test]
    fn test_rect_from_slice_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Rect::from_slice(&[bad, 0.0, 10.0, 10.0]).unwrap_err();
            assert!(matches!(err, CaptureError::InvalidArgument(_)));
            let err = Rect::from_slice(&[0.0, 0.0, 10.0, bad]).unwrap_err();
            assert!(matches!(err, CaptureError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_pixel_rect_floors_values() {
        let rect = PixelRect::floor(10.9, -3.2, 99.99, 50.5);
        assert_eq!(
            rect,
            PixelRect {
                x: 10,
                y: -4,
                width: 99,
                height: 50
            }
        );
    }

    #[test]
    fn test_pixel_rect_clamps_negative_size() {
        let rect = PixelRect::floor(0.0, 0.0, -5.0, f64::NAN);
        assert_eq!(rect.width, 0);
        assert_eq!(rect.height, 0);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_max_height_picks_tallest_monitor() {
        let layout = [
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
            Rect::new(1920.0, 0.0, 1200.0, 1920.0),
            Rect::new(-1280.0, 0.0, 1280.0, 1024.0),
        ];
        assert_eq!(max_height(&layout), Some(1920.0));
        assert_eq!(max_height(&[]), None);
    }
}
