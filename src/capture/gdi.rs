//! Screen grabs through GDI `BitBlt`.

use anyhow::{anyhow, Context, Result};
use std::ffi::c_void;

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};

use super::geometry::PixelRect;
use super::toolkit::{PackedFrame, ScreenGrabber};

/// Copies screen pixels from the desktop device context.
///
/// Reads a 32bpp top-down DIB, so every pixel arrives as little-endian
/// `0x00RRGGBB` in row-major order.
#[derive(Debug, Default)]
pub struct GdiGrabber;

impl ScreenGrabber for GdiGrabber {
    fn grab(&self, rect: PixelRect) -> Result<PackedFrame> {
        if rect.is_empty() {
            return Ok(PackedFrame {
                width: rect.width,
                height: rect.height,
                pixels: Vec::new(),
            });
        }

        let width = i32::try_from(rect.width).context("Capture width out of range")?;
        let height = i32::try_from(rect.height).context("Capture height out of range")?;
        let mut buffer = vec![0u32; rect.area()];

        unsafe {
            let screen_dc = GetDC(HWND::default());
            if screen_dc.is_invalid() {
                return Err(anyhow!("GetDC failed for the desktop"));
            }
            let mem_dc = CreateCompatibleDC(screen_dc);
            let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
            let previous = SelectObject(mem_dc, bitmap);

            let blit = BitBlt(
                mem_dc, 0, 0, width, height, screen_dc, rect.x, rect.y, SRCCOPY,
            );

            let mut info = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    // Negative height requests a top-down DIB
                    biHeight: -height,
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let lines = if blit.is_ok() {
                GetDIBits(
                    mem_dc,
                    bitmap,
                    0,
                    rect.height,
                    Some(buffer.as_mut_ptr() as *mut c_void),
                    &mut info,
                    DIB_RGB_COLORS,
                )
            } else {
                0
            };

            SelectObject(mem_dc, previous);
            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);
            ReleaseDC(HWND::default(), screen_dc);

            blit.with_context(|| format!("BitBlt failed for {:?}", rect))?;
            if lines != height {
                return Err(anyhow!(
                    "GetDIBits copied {} of {} scan lines",
                    lines,
                    height
                ));
            }
        }

        let pixels = buffer
            .into_iter()
            .map(|p| (p & 0x00FF_FFFF) as i32)
            .collect();

        Ok(PackedFrame {
            width: rect.width,
            height: rect.height,
            pixels,
        })
    }
}
