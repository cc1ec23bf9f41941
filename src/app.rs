//! Application core: lifecycle, window bookkeeping, and the shutdown-veto
//! protocol.
//!
//! At most one [`App`] exists per process. There is no global accessor:
//! the instance is owned by whoever constructed it (normally the platform
//! driver) and passed down explicitly. A process-wide liveness latch
//! enforces the 0-or-1 invariant without a global instance pointer.
//!
//! All operations here run on the single logical event-loop thread; the
//! core provides no internal synchronization for the window set or the
//! settings.

use crate::backend::Backend;
use crate::error::{AppError, WindowError};
use crate::settings::Settings;
use crate::signal::ShouldQuitSignal;
use crate::window::{WindowFormat, WindowHandle, WindowId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether an `App` is currently live in this process.
static INSTANCE_LIVE: AtomicBool = AtomicBool::new(false);

/// Outcome of one run of the shutdown-veto protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    /// Every subscriber voted to allow shutdown (or none were registered);
    /// the application is now terminating.
    Approved,
    /// A subscriber vetoed; shutdown is abandoned and the application
    /// continues exactly as if no quit had been requested.
    Vetoed,
}

/// Hooks an application author implements.
///
/// Everything is default-implemented; the minimal app overrides nothing and
/// accepts framework defaults.
pub trait AppDelegate<B: Backend> {
    /// Customize [`Settings`] before any window exists. Invoked exactly
    /// once; the settings are read-only afterwards.
    fn prepare_settings(&mut self, _settings: &mut Settings) {}

    /// Called once after the default window has been created.
    fn setup(&mut self, _app: &mut App<B>, _cx: B::Context<'_>) {}

    /// Called once per frame tick while the loop runs.
    fn update(&mut self, _app: &mut App<B>) {}

    /// Called after a window was removed from the application's window set.
    fn window_closed(&mut self, _app: &mut App<B>, _id: WindowId) {}
}

/// The single per-process application instance.
///
/// Owns the effective [`Settings`], the command-line arguments captured at
/// construction, the should-quit signal, and one strong [`WindowHandle`]
/// per live window.
pub struct App<B: Backend> {
    backend: B,
    settings: Settings,
    args: Vec<String>,
    windows: HashMap<WindowId, WindowHandle>,
    signal_should_quit: ShouldQuitSignal,
    should_exit: bool,
}

impl<B: Backend> App<B> {
    /// Construct the application instance.
    ///
    /// `settings` must already be finalized (see [`App::configure`]); the
    /// backend acts on them once here. Returns
    /// [`AppError::InstanceAlreadyLive`] if another instance exists —
    /// constructing a second concurrent instance is a programming error
    /// and is refused loudly rather than recovered from.
    pub fn new(mut backend: B, settings: Settings, args: Vec<String>) -> Result<Self, AppError> {
        if INSTANCE_LIVE.swap(true, Ordering::AcqRel) {
            return Err(AppError::InstanceAlreadyLive);
        }
        backend.apply_settings(&settings);
        log::info!("application instance constructed ({} args)", args.len());
        Ok(Self {
            backend,
            settings,
            args,
            windows: HashMap::new(),
            signal_should_quit: ShouldQuitSignal::new(),
            should_exit: false,
        })
    }

    /// Run the delegate's `prepare_settings` hook over framework defaults
    /// and return the finalized settings.
    pub fn configure<D: AppDelegate<B>>(delegate: &mut D) -> Settings {
        let mut settings = Settings::default();
        delegate.prepare_settings(&mut settings);
        settings
    }

    /// The ordered command-line arguments captured at construction.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The settings as finalized after `prepare_settings` returned.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Record an explicit quit intent. Does not run the veto protocol;
    /// call [`App::quit`] to actually negotiate shutdown.
    pub fn set_should_quit(&mut self, should_quit: bool) {
        self.settings.set_should_quit(should_quit);
    }

    /// The shutdown-veto signal; subscribe predicates here to get a vote
    /// on every quit attempt.
    pub fn signal_should_quit(&mut self) -> &mut ShouldQuitSignal {
        &mut self.signal_should_quit
    }

    /// Create a new window honoring `format` and add it to the window set.
    ///
    /// The application keeps one strong reference; the returned handle is
    /// another. On failure nothing is added.
    pub fn create_window(
        &mut self,
        cx: B::Context<'_>,
        format: &WindowFormat,
    ) -> Result<WindowHandle, WindowError> {
        let handle = self.backend.create_window(cx, format)?;
        self.windows.insert(handle.id(), handle.clone());
        log::info!(
            "created window {:?} (total: {})",
            handle.id(),
            self.windows.len()
        );
        Ok(handle)
    }

    /// Drop the application's reference to a window.
    ///
    /// Other holders keep the window alive; the platform resource is
    /// released when the last reference drops. If this was the last window
    /// and quit-on-last-window-close is enabled, the shutdown-veto
    /// protocol runs exactly once.
    pub fn close_window(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        log::info!("closed window {:?} (remaining: {})", id, self.windows.len());

        if self.windows.is_empty() && self.settings.is_quit_on_last_window_close_enabled() {
            log::info!("last window closed, negotiating shutdown");
            self.run_quit_poll();
        }
    }

    /// Handle to a live window.
    pub fn window(&self, id: WindowId) -> Option<&WindowHandle> {
        self.windows.get(&id)
    }

    /// All live windows, in no particular order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowHandle> {
        self.windows.values()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Request shutdown and run the veto protocol.
    ///
    /// On approval the exit flag is set for the driver to observe; on veto
    /// nothing changes and the application continues running. A veto is a
    /// successful outcome, not an error.
    pub fn quit(&mut self) -> QuitDecision {
        self.run_quit_poll()
    }

    /// Whether an approved shutdown is pending. Drivers poll this after
    /// each event and exit their loop when it turns true.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Single internal entry point for the veto protocol.
    fn run_quit_poll(&mut self) -> QuitDecision {
        if self.signal_should_quit.poll() {
            self.should_exit = true;
            log::info!("shutdown approved");
            QuitDecision::Approved
        } else {
            log::debug!("shutdown vetoed, resuming");
            QuitDecision::Vetoed
        }
    }

    /// Disable frame-rate limiting; the loop runs as fast as the platform
    /// drives it.
    pub fn disable_frame_rate(&mut self) {
        self.backend.disable_frame_rate();
    }

    pub fn is_frame_rate_enabled(&self) -> bool {
        self.backend.is_frame_rate_enabled()
    }

    /// Hide the system cursor, application-wide.
    pub fn hide_cursor(&mut self) {
        self.backend.hide_cursor();
    }

    /// Show the system cursor, application-wide.
    pub fn show_cursor(&mut self) {
        self.backend.show_cursor();
    }

    /// The window currently holding input focus.
    pub fn foreground_window(&self) -> Option<WindowHandle> {
        self.backend.foreground_window()
    }

    /// Re-establish the rendering context of the most recently active
    /// window. No-op when already current.
    pub fn restore_window_context(&mut self) {
        self.backend.restore_window_context();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: Backend> Drop for App<B> {
    fn drop(&mut self) {
        // Free the liveness latch first so nothing observes a half-destroyed
        // instance as live.
        INSTANCE_LIVE.store(false, Ordering::Release);
        // Forced teardown: drop the application's window references. Other
        // holders may still extend individual window lifetimes.
        self.windows.clear();
        log::info!("application instance destroyed");
    }
}

/// Bracket run before the instance is constructed. Idempotent no-op hook
/// for platform bootstrap work.
pub fn prepare_launch() {
    log::debug!("launch prepared");
}

/// Bracket run after the instance is destroyed. Idempotent no-op hook for
/// platform bootstrap work.
pub fn cleanup_launch() {
    log::debug!("launch cleaned up");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessBackend;
    use std::sync::Mutex;

    // The liveness latch is process-wide; tests that construct an App must
    // serialize on this lock.
    static APP_LOCK: Mutex<()> = Mutex::new(());

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        APP_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn new_app(settings: Settings) -> App<HeadlessBackend> {
        App::new(HeadlessBackend::new(), settings, Vec::new()).unwrap()
    }

    #[test]
    fn second_concurrent_instance_is_rejected() {
        let _guard = lock();
        let first = new_app(Settings::default());
        let second = App::new(HeadlessBackend::new(), Settings::default(), Vec::new());
        assert!(matches!(second, Err(AppError::InstanceAlreadyLive)));

        // Dropping the live instance frees the slot.
        drop(first);
        let third = App::new(HeadlessBackend::new(), Settings::default(), Vec::new());
        assert!(third.is_ok());
    }

    #[test]
    fn args_are_captured_in_order() {
        let _guard = lock();
        let args = vec!["app".to_string(), "--fullscreen".to_string()];
        let app = App::new(HeadlessBackend::new(), Settings::default(), args.clone()).unwrap();
        assert_eq!(app.args(), args.as_slice());
    }

    #[test]
    fn explicit_quit_flag_does_not_run_the_protocol() {
        let _guard = lock();
        let mut app = new_app(Settings::default());
        let polled = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let p = std::sync::Arc::clone(&polled);
        app.signal_should_quit().subscribe(move || {
            p.fetch_add(1, Ordering::SeqCst);
            true
        });

        app.set_should_quit(true);
        assert!(app.settings().should_quit());
        assert_eq!(polled.load(Ordering::SeqCst), 0);
        assert!(!app.should_exit());

        // Negotiating shutdown is a separate, explicit step.
        assert_eq!(app.quit(), QuitDecision::Approved);
        assert_eq!(polled.load(Ordering::SeqCst), 1);
        assert!(app.should_exit());
    }

    #[test]
    fn veto_leaves_state_untouched() {
        let _guard = lock();
        let mut app = new_app(Settings::default());
        let _window = app.create_window((), &WindowFormat::default()).unwrap();
        app.signal_should_quit().subscribe(|| false);

        assert_eq!(app.quit(), QuitDecision::Vetoed);
        assert!(!app.should_exit());
        assert_eq!(app.window_count(), 1);
    }

    #[test]
    fn configure_runs_the_prepare_hook_once() {
        struct Delegate {
            calls: usize,
        }
        impl AppDelegate<HeadlessBackend> for Delegate {
            fn prepare_settings(&mut self, settings: &mut Settings) {
                self.calls += 1;
                settings.set_resizable(false);
            }
        }

        let mut delegate = Delegate { calls: 0 };
        let settings = App::<HeadlessBackend>::configure(&mut delegate);
        assert_eq!(delegate.calls, 1);
        assert!(!settings.is_resizable());
    }
}
