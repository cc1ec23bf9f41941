//! Headless backend: full lifecycle semantics, no OS windowing.
//!
//! Windows are plain in-process records, displays are whatever the host
//! enumerates, and focus follows an explicit model (the newest window takes
//! focus; [`HeadlessBackend::focus_window`] moves it). Used for CI,
//! offscreen operation, and this crate's own tests.

use crate::backend::Backend;
use crate::display::Display;
use crate::error::WindowError;
use crate::settings::Settings;
use crate::window::{PlatformWindow, WeakWindowHandle, WindowFormat, WindowHandle, WindowId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Observable state of one headless window, shared between the window and
/// the backend so it survives the window's release.
struct WindowProbe {
    title: RefCell<String>,
    cursor_visible: Cell<bool>,
    released: Cell<bool>,
}

struct HeadlessWindow {
    id: WindowId,
    probe: Rc<WindowProbe>,
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.probe.released.set(true);
    }
}

impl PlatformWindow for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn set_title(&self, title: &str) {
        *self.probe.title.borrow_mut() = title.to_string();
    }

    fn set_cursor_visible(&self, visible: bool) {
        self.probe.cursor_visible.set(visible);
    }
}

/// Backend with no platform windowing system behind it.
pub struct HeadlessBackend {
    displays: Vec<Display>,
    windows: Vec<WeakWindowHandle>,
    probes: HashMap<WindowId, Rc<WindowProbe>>,
    focused: Option<WindowId>,
    cursor_visible: bool,
    frame_rate_enabled: bool,
    target_frame_rate: f32,
    next_id: u64,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    /// A backend enumerating one display named `"headless"`.
    pub fn new() -> Self {
        Self::with_displays(vec![Display::named("headless")])
    }

    /// A backend enumerating exactly `displays`.
    pub fn with_displays(displays: Vec<Display>) -> Self {
        Self {
            displays,
            windows: Vec::new(),
            probes: HashMap::new(),
            focused: None,
            cursor_visible: true,
            frame_rate_enabled: true,
            target_frame_rate: 60.0,
            next_id: 1,
        }
    }

    /// Simulate unplugging a display: later window creations targeting it
    /// fail with `DisplayUnavailable`.
    pub fn remove_display(&mut self, display: &Display) {
        self.displays.retain(|d| d != display);
    }

    /// Give input focus to a window. Focus on an unknown or dead window id
    /// clears the foreground instead.
    pub fn focus_window(&mut self, id: WindowId) {
        let alive = self.live_windows().any(|w| w.id() == id);
        self.focused = alive.then_some(id);
    }

    /// Move focus away from the application entirely.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Whether the system cursor is currently visible.
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Target rate picked up from the settings at startup.
    pub fn target_frame_rate(&self) -> f32 {
        self.target_frame_rate
    }

    /// Whether the platform resource of `id` has been released. Unknown
    /// ids report `false`.
    pub fn is_window_released(&self, id: WindowId) -> bool {
        self.probes.get(&id).is_some_and(|probe| probe.released.get())
    }

    /// Current title of a known window.
    pub fn window_title(&self, id: WindowId) -> Option<String> {
        self.probes.get(&id).map(|probe| probe.title.borrow().clone())
    }

    /// Cursor visibility as last applied to a known window.
    pub fn window_cursor_visible(&self, id: WindowId) -> Option<bool> {
        self.probes.get(&id).map(|probe| probe.cursor_visible.get())
    }

    fn live_windows(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.windows.iter().filter_map(WeakWindowHandle::upgrade)
    }
}

impl Backend for HeadlessBackend {
    type Context<'a> = ();

    fn create_window(
        &mut self,
        _cx: (),
        format: &WindowFormat,
    ) -> Result<WindowHandle, WindowError> {
        if let Some(display) = &format.display
            && !self.displays.contains(display)
        {
            return Err(WindowError::DisplayUnavailable(display.name().to_string()));
        }
        if format.size.0 == 0 || format.size.1 == 0 {
            return Err(WindowError::FormatRejected(format!(
                "zero-area window size {}x{}",
                format.size.0, format.size.1
            )));
        }

        let id = WindowId::from_raw(self.next_id);
        self.next_id += 1;

        let probe = Rc::new(WindowProbe {
            title: RefCell::new(format.title.clone()),
            cursor_visible: Cell::new(self.cursor_visible),
            released: Cell::new(false),
        });
        let window = HeadlessWindow {
            id,
            probe: Rc::clone(&probe),
        };
        let handle = WindowHandle::new(format.clone(), Box::new(window));

        self.windows.push(handle.downgrade());
        self.probes.insert(id, probe);
        // New windows take focus, matching desktop behavior.
        self.focused = Some(id);
        Ok(handle)
    }

    fn disable_frame_rate(&mut self) {
        self.frame_rate_enabled = false;
    }

    fn is_frame_rate_enabled(&self) -> bool {
        self.frame_rate_enabled
    }

    fn hide_cursor(&mut self) {
        self.cursor_visible = false;
        for window in self.windows.iter().filter_map(WeakWindowHandle::upgrade) {
            window.set_cursor_visible(false);
        }
    }

    fn show_cursor(&mut self) {
        self.cursor_visible = true;
        for window in self.windows.iter().filter_map(WeakWindowHandle::upgrade) {
            window.set_cursor_visible(true);
        }
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        let focused = self.focused?;
        self.live_windows().find(|w| w.id() == focused)
    }

    fn apply_settings(&mut self, settings: &Settings) {
        if settings.frame_rate() > 0.0 {
            self.target_frame_rate = settings.frame_rate();
        }
        if settings.is_multi_touch_enabled() {
            log::debug!("multi-touch requested; headless backend has no input source");
        }
        if settings.is_console_window_enabled() {
            log::debug!("console window requested; no console surface on the headless backend");
        }
    }
}
