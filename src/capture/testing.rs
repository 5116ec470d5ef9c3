//! In-memory toolkit and grabber used by the unit tests.

use anyhow::{anyhow, Result};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::geometry::{PixelRect, Rect};
use super::toolkit::{PackedFrame, ParentKind, RegionKind, ScreenGrabber, Toolkit, Units};

pub const WINDOW: u32 = 1;
pub const PLOT: u32 = 2;
pub const PANEL_PLOT: u32 = 3;
pub const ORPHAN: u32 = 9;

/// A single 1920x1080 monitor with one window holding two plot regions:
/// `PLOT` directly in the window, `PANEL_PLOT` inside a bordered panel.
pub struct FakeToolkit {
    monitors: Vec<Rect>,
    focused: Option<u32>,
    positions: HashMap<u32, Rect>,
    units: RefCell<HashMap<u32, Units>>,
    failing: RefCell<HashSet<u32>>,
    seen_by_position: RefCell<Vec<Units>>,
    raised: RefCell<Vec<u32>>,
    fail_raise: Cell<bool>,
}

impl FakeToolkit {
    pub fn single_monitor() -> Self {
        let mut positions = HashMap::new();
        positions.insert(WINDOW, Rect::new(100.0, 200.0, 800.0, 600.0));
        positions.insert(PLOT, Rect::new(50.0, 40.0, 300.0, 200.0));
        positions.insert(PANEL_PLOT, Rect::new(50.0, 40.0, 300.0, 200.0));
        Self {
            monitors: vec![Rect::new(0.0, 0.0, 1920.0, 1080.0)],
            focused: Some(WINDOW),
            positions,
            units: RefCell::new(HashMap::new()),
            failing: RefCell::new(HashSet::new()),
            seen_by_position: RefCell::new(Vec::new()),
            raised: RefCell::new(Vec::new()),
            fail_raise: Cell::new(false),
        }
    }

    pub fn with_monitors(mut self, monitors: Vec<Rect>) -> Self {
        self.monitors = monitors;
        self
    }

    pub fn without_focus(mut self) -> Self {
        self.focused = None;
        self
    }

    pub fn fail_position_of(&self, handle: u32) {
        self.failing.borrow_mut().insert(handle);
    }

    pub fn fail_raise(&self) {
        self.fail_raise.set(true);
    }

    pub fn units_seen_by_position(&self) -> Vec<Units> {
        self.seen_by_position.borrow().clone()
    }

    pub fn raised(&self) -> Vec<u32> {
        self.raised.borrow().clone()
    }
}

impl Toolkit for FakeToolkit {
    type Handle = u32;

    fn monitors(&self) -> Result<Vec<Rect>> {
        Ok(self.monitors.clone())
    }

    fn focused_window(&self) -> Option<u32> {
        self.focused
    }

    fn classify(&self, handle: u32) -> RegionKind<u32> {
        match handle {
            WINDOW => RegionKind::Window,
            PLOT => RegionKind::Element {
                window: WINDOW,
                parent: ParentKind::Window,
            },
            PANEL_PLOT => RegionKind::Element {
                window: WINDOW,
                parent: ParentKind::Panel,
            },
            _ => RegionKind::Unknown,
        }
    }

    fn units(&self, handle: u32) -> Units {
        self.units
            .borrow()
            .get(&handle)
            .copied()
            .unwrap_or_default()
    }

    fn set_units(&self, handle: u32, units: Units) -> Result<()> {
        self.units.borrow_mut().insert(handle, units);
        Ok(())
    }

    fn position(&self, handle: u32) -> Result<Rect> {
        let units = self.units(handle);
        self.seen_by_position.borrow_mut().push(units);
        if self.failing.borrow().contains(&handle) {
            return Err(anyhow!("position of {} unavailable", handle));
        }
        let rect = self
            .positions
            .get(&handle)
            .copied()
            .ok_or_else(|| anyhow!("unknown handle {}", handle))?;
        let scale = match units {
            Units::Pixels => 1.0,
            Units::Points => 0.75,
            Units::Normalized => 0.001,
        };
        Ok(Rect::new(
            rect.x * scale,
            rect.y * scale,
            rect.width * scale,
            rect.height * scale,
        ))
    }

    fn raise_and_flush(&self, window: u32) -> Result<()> {
        if self.fail_raise.get() {
            return Err(anyhow!("window {} cannot be raised", window));
        }
        self.raised.borrow_mut().push(window);
        Ok(())
    }
}

/// Packs channels the way a Java-style ARGB capture does: opaque alpha in the
/// top byte, which makes the value negative as an `i32`.
pub fn pack_argb(r: u8, g: u8, b: u8) -> i32 {
    (0xFF00_0000u32 | (r as u32) << 16 | (g as u32) << 8 | b as u32) as i32
}

/// Returns a gradient frame: red follows the row, green follows the column.
pub struct FakeGrabber {
    requests: RefCell<Vec<PixelRect>>,
    fail: Cell<bool>,
}

impl FakeGrabber {
    pub fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            fail: Cell::new(false),
        }
    }

    pub fn fail(&self) {
        self.fail.set(true);
    }

    pub fn requests(&self) -> Vec<PixelRect> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<PixelRect> {
        self.requests.borrow().last().copied()
    }
}

impl ScreenGrabber for FakeGrabber {
    fn grab(&self, rect: PixelRect) -> Result<PackedFrame> {
        self.requests.borrow_mut().push(rect);
        if self.fail.get() {
            return Err(anyhow!("display buffer unavailable"));
        }
        let mut pixels = Vec::with_capacity(rect.area());
        for row in 0..rect.height {
            for col in 0..rect.width {
                pixels.push(pack_argb((row % 256) as u8, (col % 256) as u8, 7));
            }
        }
        Ok(PackedFrame {
            width: rect.width,
            height: rect.height,
            pixels,
        })
    }
}
