//! Typed error variants for the lifecycle core.
//!
//! Window-creation failures are reported synchronously to the caller of
//! `App::create_window`; lifecycle-invariant violations are refused at the
//! point of construction. A shutdown veto is never an error — it is an
//! expected outcome of the quit protocol.

use thiserror::Error;

/// Errors reported by `create_window`.
///
/// Configuration problems (such as a display that was unplugged after being
/// selected in `Settings`) are detected lazily, at the moment the window is
/// realized. On failure no window is added to the application's window set.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The format references a display that is no longer enumerated.
    #[error("target display '{0}' is no longer available")]
    DisplayUnavailable(String),

    /// The platform cannot realize the requested configuration
    /// (for example an unsupported fullscreen/display combination).
    #[error("window format rejected: {0}")]
    FormatRejected(String),

    /// The platform windowing system failed while creating the window.
    #[error("platform window creation failed: {0}")]
    Backend(String),
}

/// Errors reported by `App::new`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A second application instance was constructed while one is live.
    ///
    /// At most one instance may exist per process; the constructor refuses
    /// loudly rather than degrading. The slot frees when the live instance
    /// is dropped.
    #[error("an application instance is already live in this process")]
    InstanceAlreadyLive,
}
