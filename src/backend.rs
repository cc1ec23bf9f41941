//! Contract every platform backend implements.
//!
//! One concrete backend is selected at build time (cargo features), not at
//! runtime: the `desktop` feature provides the winit-based backend, and the
//! always-available headless backend covers CI and offscreen use.

use crate::error::WindowError;
use crate::settings::Settings;
use crate::window::{WindowFormat, WindowHandle};

/// Platform operations the application core delegates to.
///
/// The five required operations plus the default-implemented pair
/// (`apply_settings`, `restore_window_context`) are the whole surface a
/// backend must cover; everything else (event delivery, rendering) is the
/// backend's own business.
pub trait Backend {
    /// Loop-scoped platform context needed to realize windows — for the
    /// desktop backend this is the live event loop, which only exists while
    /// the loop runs. Backends with no such requirement use `()`.
    type Context<'a>: Copy;

    /// Create a platform window honoring `format`.
    ///
    /// May block on the platform windowing system; not for hot per-frame
    /// paths. Must support being called multiple times to create multiple
    /// simultaneous windows. On failure no resource is leaked and the
    /// error is reported synchronously.
    fn create_window(
        &mut self,
        cx: Self::Context<'_>,
        format: &WindowFormat,
    ) -> Result<WindowHandle, WindowError>;

    /// Remove the self-imposed frame-rate cap; the loop then runs as fast
    /// as the platform drives it.
    fn disable_frame_rate(&mut self);

    /// Whether the render loop self-paces to the settings' target rate.
    fn is_frame_rate_enabled(&self) -> bool;

    /// Hide the system cursor for all of the application's windows.
    /// Idempotent; also applies to windows created afterwards.
    fn hide_cursor(&mut self);

    /// Show the system cursor for all of the application's windows.
    /// Idempotent.
    fn show_cursor(&mut self);

    /// The window currently holding input focus, or `None` when no window
    /// has focus (before the first window shows, or when focus moved to
    /// another application).
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Act on the finalized settings once, at application startup:
    /// multi-touch registration, console capture, frame-rate target.
    fn apply_settings(&mut self, _settings: &Settings) {}

    /// Re-establish the rendering context of the most recently active
    /// window after out-of-band context changes. No-op when the context is
    /// already current; callable any time once a window exists.
    fn restore_window_context(&mut self) {}
}
