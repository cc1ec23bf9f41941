//! Opaque reference to a physical display.
//!
//! Display enumeration belongs to the platform backend; this core only
//! carries references around (in `Settings` and `WindowFormat`) and hands
//! them back at window-creation time. Whether a reference is still valid is
//! checked by the backend when the window is realized, not here.

use std::fmt;
use std::sync::Arc;

/// Cheap, cloneable handle to a physical display.
///
/// Two handles compare equal when they refer to the same underlying monitor
/// (or, for backend-less handles, carry the same name).
#[derive(Clone)]
pub struct Display {
    inner: Arc<DisplayInner>,
}

struct DisplayInner {
    name: String,
    #[cfg(feature = "desktop")]
    monitor: Option<winit::monitor::MonitorHandle>,
}

impl Display {
    /// A display known only by name, as enumerated by a non-OS backend
    /// (the headless backend, or tests).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(DisplayInner {
                name: name.into(),
                #[cfg(feature = "desktop")]
                monitor: None,
            }),
        }
    }

    /// Wrap a monitor enumerated by the desktop windowing system.
    #[cfg(feature = "desktop")]
    pub fn from_monitor(monitor: winit::monitor::MonitorHandle) -> Self {
        let name = monitor.name().unwrap_or_else(|| "unnamed display".into());
        Self {
            inner: Arc::new(DisplayInner {
                name,
                monitor: Some(monitor),
            }),
        }
    }

    /// Human-readable display name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The underlying monitor, when this handle came from the desktop
    /// windowing system.
    #[cfg(feature = "desktop")]
    pub fn monitor(&self) -> Option<&winit::monitor::MonitorHandle> {
        self.inner.monitor.as_ref()
    }
}

impl PartialEq for Display {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        #[cfg(feature = "desktop")]
        if let (Some(a), Some(b)) = (&self.inner.monitor, &other.inner.monitor) {
            return a == b;
        }
        self.inner.name == other.inner.name
    }
}

impl Eq for Display {}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display").field("name", &self.inner.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_displays_compare_by_name() {
        let a = Display::named("primary");
        let b = Display::named("primary");
        let c = Display::named("secondary");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn clones_are_equal() {
        let a = Display::named("primary");
        assert_eq!(a, a.clone());
    }
}
