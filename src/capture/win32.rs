//! Win32 implementation of the capture toolkit.
//!
//! Win32 reports positions from a top-left origin. They are converted here to
//! the bottom-left convention the capturer expects: a top-level window's
//! client area against the tallest monitor, a child control against its
//! parent's client area.

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, RedrawWindow, HDC, HMONITOR, HRGN, MONITORINFO,
    RDW_ALLCHILDREN, RDW_INVALIDATE, RDW_UPDATENOW,
};
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    GetAncestor, GetForegroundWindow, GetParent, IsWindow, SetForegroundWindow, GA_ROOT,
};

use super::geometry::{max_height, Rect};
use super::toolkit::{ParentKind, RegionKind, Toolkit, Units};
use super::window::{client_origin, client_size, window_rect};

const DEFAULT_DPI: f64 = 96.0;
const POINTS_PER_INCH: f64 = 72.0;

/// Time given to the window manager after raising a window.
const RAISE_SETTLE: Duration = Duration::from_millis(100);

/// Win32 windowing toolkit.
///
/// Win32 controls have no unit property, so the unit each handle reports in
/// is tracked here.
#[derive(Debug, Default)]
pub struct Win32Toolkit {
    units: RefCell<HashMap<isize, Units>>,
}

impl Win32Toolkit {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_top_level(hwnd: HWND) -> bool {
        unsafe { GetAncestor(hwnd, GA_ROOT) == hwnd }
    }

    /// Pixel rectangle of `hwnd` in bottom-left coordinates, plus the extent
    /// that normalized units are relative to.
    fn pixel_rect(&self, hwnd: HWND) -> Result<(Rect, (f64, f64))> {
        if Self::is_top_level(hwnd) {
            let origin = client_origin(hwnd)?;
            let (w, h) = client_size(hwnd)?;
            let monitors = self.monitors()?;
            let desktop_h = max_height(&monitors).ok_or_else(|| anyhow!("No displays"))?;
            let desktop_w = monitors.iter().map(|m| m.x + m.width).fold(0.0, f64::max);
            let rect = Rect::new(
                origin.x as f64,
                desktop_h - origin.y as f64 - h as f64,
                w as f64,
                h as f64,
            );
            Ok((rect, (desktop_w, desktop_h)))
        } else {
            let parent = unsafe { GetParent(hwnd)? };
            let parent_origin = client_origin(parent)?;
            let (parent_w, parent_h) = client_size(parent)?;
            let outer = window_rect(hwnd)?;
            let w = outer.right - outer.left;
            let h = outer.bottom - outer.top;
            let top = outer.top - parent_origin.y;
            let rect = Rect::new(
                (outer.left - parent_origin.x) as f64,
                (parent_h - top - h) as f64,
                w as f64,
                h as f64,
            );
            Ok((rect, (parent_w as f64, parent_h as f64)))
        }
    }
}

impl Toolkit for Win32Toolkit {
    type Handle = HWND;

    fn monitors(&self) -> Result<Vec<Rect>> {
        unsafe extern "system" fn enum_callback(
            monitor: HMONITOR,
            _hdc: HDC,
            _clip: *mut RECT,
            lparam: LPARAM,
        ) -> BOOL {
            let monitors = unsafe { &mut *(lparam.0 as *mut Vec<Rect>) };
            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
                let r = info.rcMonitor;
                monitors.push(Rect::new(
                    r.left as f64,
                    r.top as f64,
                    (r.right - r.left) as f64,
                    (r.bottom - r.top) as f64,
                ));
            }
            TRUE
        }

        let mut monitors: Vec<Rect> = Vec::new();
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(enum_callback),
                LPARAM(&mut monitors as *mut _ as isize),
            )
        };
        if !ok.as_bool() {
            return Err(anyhow!("EnumDisplayMonitors failed"));
        }
        Ok(monitors)
    }

    fn focused_window(&self) -> Option<HWND> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return None;
        }
        Some(unsafe { GetAncestor(hwnd, GA_ROOT) })
    }

    fn classify(&self, handle: HWND) -> RegionKind<HWND> {
        if handle.0.is_null() || !unsafe { IsWindow(handle) }.as_bool() {
            return RegionKind::Unknown;
        }
        let root = unsafe { GetAncestor(handle, GA_ROOT) };
        if root.0.is_null() {
            return RegionKind::Unknown;
        }
        if root == handle {
            return RegionKind::Window;
        }
        match unsafe { GetParent(handle) } {
            Ok(parent) if parent == root => RegionKind::Element {
                window: root,
                parent: ParentKind::Window,
            },
            Ok(_) => RegionKind::Element {
                window: root,
                parent: ParentKind::Panel,
            },
            Err(_) => RegionKind::Unknown,
        }
    }

    fn units(&self, handle: HWND) -> Units {
        self.units
            .borrow()
            .get(&(handle.0 as isize))
            .copied()
            .unwrap_or_default()
    }

    fn set_units(&self, handle: HWND, units: Units) -> Result<()> {
        self.units.borrow_mut().insert(handle.0 as isize, units);
        Ok(())
    }

    fn position(&self, handle: HWND) -> Result<Rect> {
        let (rect, (ref_w, ref_h)) = self.pixel_rect(handle)?;
        match self.units(handle) {
            Units::Pixels => Ok(rect),
            Units::Points => {
                let dpi = match unsafe { GetDpiForWindow(handle) } {
                    0 => DEFAULT_DPI,
                    dpi => dpi as f64,
                };
                let scale = POINTS_PER_INCH / dpi;
                Ok(Rect::new(
                    rect.x * scale,
                    rect.y * scale,
                    rect.width * scale,
                    rect.height * scale,
                ))
            }
            Units::Normalized => {
                if ref_w <= 0.0 || ref_h <= 0.0 {
                    return Err(anyhow!("Reference extent of {:?} is empty", handle));
                }
                Ok(Rect::new(
                    rect.x / ref_w,
                    rect.y / ref_h,
                    rect.width / ref_w,
                    rect.height / ref_h,
                ))
            }
        }
    }

    fn raise_and_flush(&self, window: HWND) -> Result<()> {
        unsafe {
            // Foreground requests can be refused by the shell; the redraw
            // below still runs.
            if !SetForegroundWindow(window).as_bool() {
                log::warn!("SetForegroundWindow refused for {:?}", window);
            }
            let flushed = RedrawWindow(
                window,
                None,
                HRGN::default(),
                RDW_INVALIDATE | RDW_UPDATENOW | RDW_ALLCHILDREN,
            );
            if !flushed.as_bool() {
                return Err(anyhow!("RedrawWindow failed for {:?}", window));
            }
        }
        std::thread::sleep(RAISE_SETTLE);
        Ok(())
    }
}
