//! Packed pixel decoding.
//!
//! The capture facility hands back one 32-bit integer per pixel. Adding 2^24
//! normalises the sign of an opaque ARGB value, after which the channels are
//! recovered by byte-position arithmetic. The Win32 GDI backend produces
//! `0x00RRGGBB`, which decodes the same way.

use anyhow::{anyhow, Result};
use image::RgbImage;

use super::toolkit::PackedFrame;

const SIGN_OFFSET: i64 = 1 << 24;

/// Splits a packed pixel into `[red, green, blue]`.
pub fn decode_pixel(value: i32) -> [u8; 3] {
    let v = value as i64 + SIGN_OFFSET;
    let blue = v.rem_euclid(256);
    let green = (v - blue).div_euclid(256).rem_euclid(256);
    let red = (v - 256 * green).div_euclid(65536).rem_euclid(256);
    [red as u8, green as u8, blue as u8]
}

/// A captured region, indexed `[row, column, channel]` with RGB channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

/// Colour table slot kept for callers that expect an indexed-image pair.
/// Captures are always true colour, so it is always empty.
pub type ColorTable = Vec<[u8; 3]>;

impl CapturedImage {
    /// Decodes a row-major packed frame into three channel planes.
    pub fn from_packed(frame: &PackedFrame) -> Result<Self> {
        let expected = frame.width as usize * frame.height as usize;
        if frame.pixels.len() != expected {
            return Err(anyhow!(
                "Packed frame has {} pixels, expected {}x{} = {}",
                frame.pixels.len(),
                frame.width,
                frame.height,
                expected
            ));
        }

        let samples = frame
            .pixels
            .iter()
            .flat_map(|&value| decode_pixel(value))
            .collect();

        Ok(Self {
            width: frame.width,
            height: frame.height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(height, width, 3)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, 3)
    }

    /// Sample at `[row, column, channel]`, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize, channel: usize) -> Option<u8> {
        if row >= self.height as usize || column >= self.width as usize || channel >= 3 {
            return None;
        }
        self.samples
            .get((row * self.width as usize + column) * 3 + channel)
            .copied()
    }

    /// Raw interleaved samples, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_rgb_image(self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.samples)
            .ok_or_else(|| anyhow!("Sample buffer does not match image dimensions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::testing::pack_argb;

    #[test]
    fn test_decode_sign_normalised_value() {
        for &(r, g, b) in &[(0u8, 0u8, 0u8), (255, 255, 255), (12, 200, 99), (255, 0, 128)] {
            let packed = (1i64 << 24) + r as i64 * 65536 + g as i64 * 256 + b as i64;
            assert_eq!(decode_pixel(packed as i32), [r, g, b]);
        }
    }

    #[test]
    fn test_decode_opaque_argb() {
        assert_eq!(decode_pixel(pack_argb(10, 20, 30)), [10, 20, 30]);
        assert_eq!(decode_pixel(pack_argb(255, 255, 255)), [255, 255, 255]);
        assert_eq!(decode_pixel(-1), [255, 255, 255]);
    }

    #[test]
    fn test_decode_gdi_layout() {
        // GDI DIBs leave the top byte zero.
        assert_eq!(decode_pixel(0x00AB_CDEF), [0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn test_from_packed_is_row_major() {
        // 3 wide, 2 tall: red encodes the row, green the column.
        let mut pixels = Vec::new();
        for row in 0..2u8 {
            for col in 0..3u8 {
                pixels.push(pack_argb(row, col, 50));
            }
        }
        let frame = PackedFrame {
            width: 3,
            height: 2,
            pixels,
        };

        let image = CapturedImage::from_packed(&frame).unwrap();

        assert_eq!(image.dimensions(), (2, 3, 3));
        assert_eq!(image.get(1, 2, 0), Some(1));
        assert_eq!(image.get(1, 2, 1), Some(2));
        assert_eq!(image.get(0, 1, 1), Some(1));
        assert_eq!(image.get(0, 0, 2), Some(50));
        assert_eq!(image.get(2, 0, 0), None);
        assert_eq!(image.get(0, 0, 3), None);
    }

    #[test]
    fn test_from_packed_rejects_size_mismatch() {
        let frame = PackedFrame {
            width: 4,
            height: 4,
            pixels: vec![0; 15],
        };
        assert!(CapturedImage::from_packed(&frame).is_err());
    }

    #[test]
    fn test_into_rgb_image() {
        let frame = PackedFrame {
            width: 2,
            height: 1,
            pixels: vec![pack_argb(1, 2, 3), pack_argb(4, 5, 6)],
        };
        let img = CapturedImage::from_packed(&frame)
            .unwrap()
            .into_rgb_image()
            .unwrap();
        assert_eq!(img.get_pixel(1, 0).0, [4, 5, 6]);
    }
}
