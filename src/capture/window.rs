//! Window discovery and client-area geometry for the review host.

use anyhow::{anyhow, Result};
use log::{debug, info};

use windows::Win32::Foundation::{BOOL, HWND, LPARAM, POINT, RECT, TRUE};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumChildWindows, EnumWindows, GetClassNameW, GetClientRect, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
};

/// Reads a window's title.
pub fn window_title(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buf: Vec<u16> = vec![0; (len + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buf);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

/// Reads a window's class name.
pub fn class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    String::from_utf16_lossy(&buf[..len.max(0) as usize])
}

/// Finds the first visible top-level window whose title contains `needle`
/// (case-insensitive).
pub fn find_window_by_title(needle: &str) -> Result<HWND> {
    struct EnumData {
        needle: String,
        hwnd: Option<HWND>,
        title: Option<String>,
    }

    unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
        unsafe {
            let data = &mut *(lparam.0 as *mut EnumData);

            if !IsWindowVisible(hwnd).as_bool() {
                return TRUE;
            }

            let title = window_title(hwnd);
            if title.is_empty() {
                return TRUE;
            }

            if title.to_lowercase().contains(&data.needle) {
                data.hwnd = Some(hwnd);
                data.title = Some(title);
                return BOOL(0); // Stop enumeration
            }

            TRUE
        }
    }

    info!("Searching for window titled \"{}\"...", needle);
    let mut data = EnumData {
        needle: needle.to_lowercase(),
        hwnd: None,
        title: None,
    };
    unsafe {
        // EnumWindows reports an error when the callback stops early
        let _ = EnumWindows(Some(enum_callback), LPARAM(&mut data as *mut _ as isize));
    }

    if let Some(title) = &data.title {
        info!("Found window: \"{}\"", title);
    }

    data.hwnd.ok_or_else(|| {
        anyhow!(
            "Could not find a window titled \"{}\". Is the review application running?",
            needle
        )
    })
}

/// Finds a descendant of `parent` with the given class name and, when
/// `caption` is set, the given window text (case-insensitive).
pub fn find_child(parent: HWND, class: &str, caption: Option<&str>) -> Result<HWND> {
    struct EnumData {
        class: String,
        caption: Option<String>,
        hwnd: Option<HWND>,
    }

    unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let data = unsafe { &mut *(lparam.0 as *mut EnumData) };

        if !class_name(hwnd).eq_ignore_ascii_case(&data.class) {
            return TRUE;
        }
        if let Some(caption) = &data.caption {
            if !window_title(hwnd).eq_ignore_ascii_case(caption) {
                return TRUE;
            }
        }

        data.hwnd = Some(hwnd);
        BOOL(0)
    }

    let mut data = EnumData {
        class: class.to_string(),
        caption: caption.map(str::to_string),
        hwnd: None,
    };
    unsafe {
        let _ = EnumChildWindows(parent, Some(enum_callback), LPARAM(&mut data as *mut _ as isize));
    }

    debug!(
        "Child lookup class={} caption={:?} -> {:?}",
        class, caption, data.hwnd
    );

    data.hwnd.ok_or_else(|| match caption {
        Some(caption) => anyhow!("No \"{}\" {} control in host window", caption, class),
        None => anyhow!("No {} control in host window", class),
    })
}

/// Client area origin in screen coordinates.
pub fn client_origin(hwnd: HWND) -> Result<POINT> {
    let mut pt = POINT { x: 0, y: 0 };
    unsafe {
        if !ClientToScreen(hwnd, &mut pt).as_bool() {
            return Err(anyhow!("ClientToScreen failed for {:?}", hwnd));
        }
    }
    Ok(pt)
}

/// Client area size.
pub fn client_size(hwnd: HWND) -> Result<(i32, i32)> {
    let mut rect = RECT::default();
    unsafe { GetClientRect(hwnd, &mut rect)? };
    Ok((rect.right - rect.left, rect.bottom - rect.top))
}

/// Outer window rectangle in screen coordinates.
pub fn window_rect(hwnd: HWND) -> Result<RECT> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect)? };
    Ok(rect)
}
