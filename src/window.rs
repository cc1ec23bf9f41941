//! Window format descriptor and shared window handles.
//!
//! A [`WindowFormat`] is the value descriptor consumed at window-creation
//! time. A [`WindowHandle`] is a shared, reference-counted handle to the
//! platform window resource: the application holds one reference per live
//! window, any other holder extends the window's lifetime, and the platform
//! resource is released exactly once, when the last reference drops.

use crate::display::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};

/// Identifier for a window, unique within the owning application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    /// Build an id from the backend's raw identifier.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The backend's raw identifier.
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// Value descriptor for a window at creation time.
///
/// The default-window format inside [`Settings`](crate::Settings) is the
/// single source of truth for the fullscreen/resizable/borderless/
/// always-on-top/display fields; `Settings` accessors delegate here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowFormat {
    /// Window title.
    #[serde(default = "defaults::title")]
    pub title: String,
    /// Logical size in pixels, (width, height).
    #[serde(default = "defaults::size")]
    pub size: (u32, u32),
    /// Logical position; `None` lets the platform place the window.
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    /// Whether the window can be resized by the user.
    #[serde(default = "defaults::resizable")]
    pub resizable: bool,
    /// Whether the window is created without a border (chrome/frame).
    #[serde(default)]
    pub borderless: bool,
    /// Whether the window always remains above all other windows.
    #[serde(default)]
    pub always_on_top: bool,
    /// Whether the window covers its target display.
    #[serde(default)]
    pub fullscreen: bool,
    /// Target display; `None` means the platform default.
    ///
    /// Display references are runtime-enumerated and not persistable.
    #[serde(skip)]
    pub display: Option<Display>,
}

impl Default for WindowFormat {
    fn default() -> Self {
        Self {
            title: defaults::title(),
            size: defaults::size(),
            position: None,
            resizable: defaults::resizable(),
            borderless: false,
            always_on_top: false,
            fullscreen: false,
            display: None,
        }
    }
}

impl WindowFormat {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }
}

/// Default values for window-format fields.
mod defaults {
    pub fn title() -> String {
        "vitrine".to_string()
    }

    pub fn size() -> (u32, u32) {
        (800, 600)
    }

    pub fn resizable() -> bool {
        true
    }
}

/// Operations every platform window resource supports.
///
/// Implemented by backends; the resource is released by the implementor's
/// `Drop`, which runs exactly once, when the last [`WindowHandle`] clone is
/// dropped.
pub trait PlatformWindow {
    /// Backend-assigned identifier.
    fn id(&self) -> WindowId;
    /// Update the window title.
    fn set_title(&self, title: &str);
    /// Toggle system cursor visibility over this window.
    fn set_cursor_visible(&self, visible: bool);
    /// Ask the platform to schedule a redraw.
    fn request_redraw(&self) {}
}

struct WindowShared {
    format: WindowFormat,
    platform: Box<dyn PlatformWindow>,
}

/// Shared, reference-counted handle to a platform window.
///
/// Cloning is cheap. The window does not own the application; components
/// that need a back-reference should hold a [`WeakWindowHandle`] so they
/// never extend the window's lifetime.
#[derive(Clone)]
pub struct WindowHandle {
    inner: Arc<WindowShared>,
}

impl WindowHandle {
    /// Wrap a freshly created platform window. Called by backends.
    pub fn new(format: WindowFormat, platform: Box<dyn PlatformWindow>) -> Self {
        Self {
            inner: Arc::new(WindowShared { format, platform }),
        }
    }

    /// Identifier of the underlying window.
    pub fn id(&self) -> WindowId {
        self.inner.platform.id()
    }

    /// The format this window was created with.
    pub fn format(&self) -> &WindowFormat {
        &self.inner.format
    }

    pub fn set_title(&self, title: &str) {
        self.inner.platform.set_title(title);
    }

    pub fn request_redraw(&self) {
        self.inner.platform.request_redraw();
    }

    pub(crate) fn set_cursor_visible(&self, visible: bool) {
        self.inner.platform.set_cursor_visible(visible);
    }

    /// A non-owning handle that never extends the window's lifetime.
    pub fn downgrade(&self) -> WeakWindowHandle {
        WeakWindowHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowHandle")
            .field("id", &self.id())
            .field("title", &self.inner.format.title)
            .finish()
    }
}

/// Non-owning companion to [`WindowHandle`].
#[derive(Clone, Default)]
pub struct WeakWindowHandle {
    inner: Weak<WindowShared>,
}

impl WeakWindowHandle {
    /// Upgrade to a strong handle if the window is still alive.
    pub fn upgrade(&self) -> Option<WindowHandle> {
        self.inner.upgrade().map(|inner| WindowHandle { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct ProbeWindow {
        id: WindowId,
        released: Rc<Cell<bool>>,
    }

    impl Drop for ProbeWindow {
        fn drop(&mut self) {
            // Each probe must be released exactly once; a double release
            // would mean a second Drop on the same resource.
            assert!(!self.released.get());
            self.released.set(true);
        }
    }

    impl PlatformWindow for ProbeWindow {
        fn id(&self) -> WindowId {
            self.id
        }
        fn set_title(&self, _title: &str) {}
        fn set_cursor_visible(&self, _visible: bool) {}
    }

    fn probe(id: u64) -> (WindowHandle, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        let window = ProbeWindow {
            id: WindowId::from_raw(id),
            released: Rc::clone(&released),
        };
        (
            WindowHandle::new(WindowFormat::default(), Box::new(window)),
            released,
        )
    }

    #[test]
    fn resource_released_on_last_clone_drop() {
        let (handle, released) = probe(1);
        let clone = handle.clone();
        drop(handle);
        assert!(!released.get());
        drop(clone);
        assert!(released.get());
    }

    #[test]
    fn weak_handle_does_not_extend_lifetime() {
        let (handle, released) = probe(2);
        let weak = handle.downgrade();
        assert!(weak.upgrade().is_some());
        drop(handle);
        assert!(released.get());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn format_defaults() {
        let format = WindowFormat::default();
        assert_eq!(format.size, (800, 600));
        assert!(format.resizable);
        assert!(!format.borderless);
        assert!(!format.always_on_top);
        assert!(!format.fullscreen);
        assert!(format.display.is_none());
        assert!(format.position.is_none());
    }
}
