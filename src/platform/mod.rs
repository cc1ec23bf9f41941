//! Platform backends.
//!
//! - [`headless`]: in-process backend with full lifecycle bookkeeping and
//!   no OS windowing; always available.
//! - [`desktop`]: winit-based desktop backend, behind the `desktop`
//!   feature (enabled by default).

#[cfg(feature = "desktop")]
pub mod desktop;
pub mod headless;
