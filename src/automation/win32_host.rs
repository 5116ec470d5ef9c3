//! Win32 adapter for the review host application.
//!
//! Drives the host's view selector combo box and export button with window
//! messages, then waits for the exported table to land in the export directory.

use anyhow::{anyhow, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    GetDlgCtrlID, GetParent, SendMessageW, BM_CLICK, CBN_SELCHANGE, CB_FINDSTRINGEXACT,
    CB_SETCURSEL, WM_COMMAND,
};

use crate::automation::config::ReviewConfig;
use crate::automation::export_wait::wait_for_export;
use crate::automation::host::HostApplication;
use crate::automation::views::PlotView;
use crate::capture::window::{find_child, find_window_by_title};

pub struct Win32Host {
    window: HWND,
    selector: HWND,
    export_button: HWND,
    export_dir: PathBuf,
    timeout: Duration,
    poll_interval: Duration,
}

impl Win32Host {
    /// Locates the host window and its controls as described by `config`.
    pub fn connect(config: &ReviewConfig) -> Result<Self> {
        let window = find_window_by_title(&config.host_window_title)?;
        let selector = find_child(window, &config.view_selector_class, None)?;
        let export_button = find_child(window, "Button", Some(&config.export_button_text))?;
        let export_dir = config.export_dir();
        info!("Host exports are read from {}", export_dir.display());

        Ok(Self {
            window,
            selector,
            export_button,
            export_dir,
            timeout: Duration::from_millis(config.export_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

impl HostApplication for Win32Host {
    type Handle = HWND;

    fn window(&self) -> HWND {
        self.window
    }

    fn select_view(&mut self, view: &PlotView) -> Result<()> {
        let title = wide(view.title);
        unsafe {
            // wParam -1 searches the whole list
            let index = SendMessageW(
                self.selector,
                CB_FINDSTRINGEXACT,
                WPARAM(usize::MAX),
                LPARAM(title.as_ptr() as isize),
            );
            if index.0 < 0 {
                return Err(anyhow!("View \"{}\" is not in the selector", view.title));
            }
            debug!("Selecting \"{}\" at index {}", view.title, index.0);

            SendMessageW(self.selector, CB_SETCURSEL, WPARAM(index.0 as usize), LPARAM(0));

            // CB_SETCURSEL does not notify the owner, so send the change ourselves
            let id = GetDlgCtrlID(self.selector) as usize;
            let owner = GetParent(self.selector).unwrap_or(self.window);
            SendMessageW(
                owner,
                WM_COMMAND,
                WPARAM((CBN_SELCHANGE as usize) << 16 | (id & 0xFFFF)),
                LPARAM(self.selector.0 as isize),
            );
        }
        Ok(())
    }

    fn run_export(&mut self, view: &PlotView, load_name: &str) -> Result<String> {
        let path = self.export_dir.join(view.data_file_name(load_name));
        let clicked_at = SystemTime::now();
        unsafe {
            SendMessageW(self.export_button, BM_CLICK, WPARAM(0), LPARAM(0));
        }
        debug!("Waiting for {}", path.display());
        wait_for_export(&path, clicked_at, self.timeout, self.poll_interval)
    }
}
