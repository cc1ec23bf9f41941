//! Application settings, finalized before any window exists.
//!
//! `Settings` is constructed with documented defaults, handed mutably to
//! the delegate's `prepare_settings` hook exactly once, and read-only
//! thereafter through `App::settings`. The default-window format is the
//! single source of truth for the fullscreen/resizable/borderless/
//! always-on-top/display fields; the accessors here delegate to it and
//! keep no duplicate state.

use crate::display::Display;
use crate::window::WindowFormat;
use serde::{Deserialize, Serialize};

/// Immutable-after-setup application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Format for the default window created at launch.
    #[serde(default)]
    default_window_format: WindowFormat,
    /// Capture console/stdout output in a secondary window where the
    /// platform has such a surface. Stored everywhere, acted on only by
    /// backends that support it.
    #[serde(default)]
    console_window: bool,
    /// Register for multi-touch input at backend startup.
    #[serde(default)]
    multi_touch: bool,
    /// Initiate the shutdown protocol when the window count reaches zero.
    #[serde(default = "defaults::quit_on_last_window_close")]
    quit_on_last_window_close: bool,
    /// Explicit, externally-forced quit intent.
    #[serde(default)]
    should_quit: bool,
    /// Target frame rate for backends that self-pace their loop.
    #[serde(default = "defaults::frame_rate")]
    frame_rate: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_window_format: WindowFormat::default(),
            console_window: false,
            multi_touch: false,
            quit_on_last_window_close: defaults::quit_on_last_window_close(),
            should_quit: false,
            frame_rate: defaults::frame_rate(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an explicit quit intent, independent of window-close events.
    ///
    /// This only sets the flag; it does not run the shutdown-veto protocol.
    /// Callers tearing down must still go through `App::quit`.
    pub fn set_should_quit(&mut self, should_quit: bool) {
        self.should_quit = should_quit;
    }

    /// Whether an explicit quit has been requested.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the default window covers its target display.
    pub fn is_full_screen(&self) -> bool {
        self.default_window_format.fullscreen
    }

    /// Sets the default window to cover its target display.
    pub fn set_full_screen(&mut self, fullscreen: bool) {
        self.default_window_format.fullscreen = fullscreen;
    }

    /// Whether the default window is resizable.
    pub fn is_resizable(&self) -> bool {
        self.default_window_format.resizable
    }

    /// Sets the default window to be resizable or not.
    pub fn set_resizable(&mut self, resizable: bool) {
        self.default_window_format.resizable = resizable;
    }

    /// Whether the default window is created without a border.
    pub fn is_borderless(&self) -> bool {
        self.default_window_format.borderless
    }

    /// Sets the default window to be created without a border.
    pub fn set_borderless(&mut self, borderless: bool) {
        self.default_window_format.borderless = borderless;
    }

    /// Whether the default window always remains above all other windows.
    pub fn is_always_on_top(&self) -> bool {
        self.default_window_format.always_on_top
    }

    /// Sets whether the default window always remains above other windows.
    pub fn set_always_on_top(&mut self, always_on_top: bool) {
        self.default_window_format.always_on_top = always_on_top;
    }

    /// The display the default window targets; `None` means the platform
    /// default. Validity is checked by the backend at window creation.
    pub fn display(&self) -> Option<&Display> {
        self.default_window_format.display.as_ref()
    }

    /// Select which display the default window targets.
    pub fn set_display(&mut self, display: Display) {
        self.default_window_format.display = Some(display);
    }

    /// Enable the secondary console-capture window where the platform has
    /// one. On other platforms the flag is stored but has no effect.
    pub fn enable_console_window(&mut self, enable: bool) {
        self.console_window = enable;
    }

    pub fn is_console_window_enabled(&self) -> bool {
        self.console_window
    }

    /// Register intent to receive multi-touch input. The OS registration
    /// itself is performed by the backend when the application starts.
    pub fn enable_multi_touch(&mut self, enable: bool) {
        self.multi_touch = enable;
    }

    pub fn is_multi_touch_enabled(&self) -> bool {
        self.multi_touch
    }

    /// Sets whether the app initiates the shutdown-veto protocol when its
    /// last window closes. Enabled by default.
    pub fn enable_quit_on_last_window_close(&mut self, enable: bool) {
        self.quit_on_last_window_close = enable;
    }

    pub fn is_quit_on_last_window_close_enabled(&self) -> bool {
        self.quit_on_last_window_close
    }

    /// Target frame rate for self-pacing backends. Values at or below zero
    /// fall back to the default at the point of use.
    pub fn set_frame_rate(&mut self, frames_per_second: f32) {
        self.frame_rate = frames_per_second;
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// The full default-window format.
    pub fn default_window_format(&self) -> &WindowFormat {
        &self.default_window_format
    }

    /// Mutable access to the default-window format, for setup code that
    /// wants to configure size/position/title directly.
    pub fn default_window_format_mut(&mut self) -> &mut WindowFormat {
        &mut self.default_window_format
    }
}

/// Default values for settings fields.
mod defaults {
    pub fn quit_on_last_window_close() -> bool {
        true
    }

    pub fn frame_rate() -> f32 {
        60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let settings = Settings::default();
        assert!(settings.is_resizable());
        assert!(!settings.is_borderless());
        assert!(!settings.is_always_on_top());
        assert!(!settings.is_full_screen());
        assert!(settings.display().is_none());
        assert!(!settings.is_console_window_enabled());
        assert!(!settings.is_multi_touch_enabled());
        assert!(settings.is_quit_on_last_window_close_enabled());
        assert!(!settings.should_quit());
        assert_eq!(settings.frame_rate(), 60.0);
    }

    #[test]
    fn window_flags_delegate_to_format() {
        let mut settings = Settings::default();
        settings.set_resizable(false);
        settings.set_borderless(true);
        settings.set_always_on_top(true);

        // The format sub-object is the single source of truth.
        let format = settings.default_window_format();
        assert!(!format.resizable);
        assert!(format.borderless);
        assert!(format.always_on_top);

        // Untouched fields keep their defaults.
        assert!(!settings.is_full_screen());
        assert!(settings.is_quit_on_last_window_close_enabled());
        assert!(!settings.should_quit());
    }

    #[test]
    fn display_selection_round_trips() {
        let mut settings = Settings::default();
        let display = Display::named("secondary");
        settings.set_display(display.clone());
        assert_eq!(settings.display(), Some(&display));
        assert_eq!(
            settings.default_window_format().display.as_ref(),
            Some(&display)
        );
    }

    #[test]
    fn should_quit_is_just_a_flag() {
        let mut settings = Settings::default();
        settings.set_should_quit(true);
        assert!(settings.should_quit());
        settings.set_should_quit(false);
        assert!(!settings.should_quit());
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.is_quit_on_last_window_close_enabled());
        assert_eq!(settings.frame_rate(), 60.0);
        assert_eq!(settings.default_window_format().size, (800, 600));
    }
}
