//! Desktop backend built on winit.
//!
//! Windows can only be realized while the event loop is live, so the
//! backend's creation context is `&ActiveEventLoop`; the event-loop driver
//! threads it through. Cursor visibility and foreground focus
//! are tracked here against weak window references — the backend never
//! extends a window's lifetime.

use crate::backend::Backend;
use crate::error::WindowError;
use crate::settings::Settings;
use crate::window::{PlatformWindow, WeakWindowHandle, WindowFormat, WindowHandle, WindowId};
use std::time::Duration;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window, WindowLevel};

mod runner;

pub use runner::{launch, launch_with_args};

struct DesktopWindow {
    window: Window,
}

impl PlatformWindow for DesktopWindow {
    fn id(&self) -> WindowId {
        WindowId::from_raw(u64::from(self.window.id()))
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn set_cursor_visible(&self, visible: bool) {
        self.window.set_cursor_visible(visible);
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Backend over the OS windowing system.
pub struct DesktopBackend {
    windows: Vec<WeakWindowHandle>,
    focused: Option<WindowId>,
    cursor_visible: bool,
    frame_rate_enabled: bool,
    target_frame_rate: f32,
}

impl Default for DesktopBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopBackend {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            cursor_visible: true,
            frame_rate_enabled: true,
            target_frame_rate: 60.0,
        }
    }

    /// Record a focus change reported by the event loop.
    pub(crate) fn note_focus(&mut self, id: WindowId, focused: bool) {
        if focused {
            self.focused = Some(id);
        } else if self.focused == Some(id) {
            // Focus moved to another application (or nowhere).
            self.focused = None;
        }
    }

    /// Interval between frame ticks at the target rate.
    pub(crate) fn frame_interval(&self) -> Duration {
        let rate = if self.target_frame_rate > 0.0 {
            self.target_frame_rate
        } else {
            60.0
        };
        Duration::from_secs_f64(1.0 / f64::from(rate))
    }

    /// Resolve the format's display against the currently enumerated
    /// monitors. A stale reference is the deferred configuration error the
    /// settings contract promises.
    fn resolve_monitor(
        event_loop: &ActiveEventLoop,
        format: &WindowFormat,
    ) -> Result<Option<MonitorHandle>, WindowError> {
        let Some(display) = &format.display else {
            return Ok(None);
        };
        let stale = || WindowError::DisplayUnavailable(display.name().to_string());
        let monitor = display.monitor().ok_or_else(stale)?;
        if event_loop.available_monitors().any(|m| m == *monitor) {
            Ok(Some(monitor.clone()))
        } else {
            Err(stale())
        }
    }

    fn live_windows(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.windows.iter().filter_map(WeakWindowHandle::upgrade)
    }
}

impl Backend for DesktopBackend {
    type Context<'a> = &'a ActiveEventLoop;

    fn create_window(
        &mut self,
        cx: &ActiveEventLoop,
        format: &WindowFormat,
    ) -> Result<WindowHandle, WindowError> {
        let monitor = Self::resolve_monitor(cx, format)?;

        let mut attrs = Window::default_attributes()
            .with_title(&format.title)
            .with_inner_size(LogicalSize::new(format.size.0, format.size.1))
            .with_resizable(format.resizable)
            .with_decorations(!format.borderless);

        if format.always_on_top {
            attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if let Some((x, y)) = format.position {
            attrs = attrs.with_position(LogicalPosition::new(x, y));
        } else if let Some(monitor) = &monitor
            && !format.fullscreen
        {
            // Windowed on a specific display: open at that display's origin.
            attrs = attrs.with_position(monitor.position());
        }
        if format.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }

        let window = cx
            .create_window(attrs)
            .map_err(|e| WindowError::Backend(e.to_string()))?;
        window.set_cursor_visible(self.cursor_visible);

        let handle = WindowHandle::new(format.clone(), Box::new(DesktopWindow { window }));
        self.windows.push(handle.downgrade());
        Ok(handle)
    }

    fn disable_frame_rate(&mut self) {
        self.frame_rate_enabled = false;
        log::info!("frame-rate cap disabled, loop runs uncapped");
    }

    fn is_frame_rate_enabled(&self) -> bool {
        self.frame_rate_enabled
    }

    fn hide_cursor(&mut self) {
        self.cursor_visible = false;
        for window in self.live_windows() {
            window.set_cursor_visible(false);
        }
    }

    fn show_cursor(&mut self) {
        self.cursor_visible = true;
        for window in self.live_windows() {
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
            // winit delivers touch events unconditionally; nothing extra to
            // register with the OS here.
            log::debug!("multi-touch enabled");
        }
        if settings.is_console_window_enabled() {
            #[cfg(windows)]
            log::info!("console window capture requested");
            #[cfg(not(windows))]
            log::debug!("console window toggle stored; no console surface on this platform");
        }
    }
}
