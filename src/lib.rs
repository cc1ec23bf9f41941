//! Application lifecycle and window management core for desktop
//! interactive-graphics applications.
//!
//! This crate provides the platform-independent contract an interactive
//! desktop app is built on:
//!
//! - [`Settings`]: configuration finalized before any window exists
//! - [`App`]: the single per-process application instance, owning the
//!   window set, the command-line arguments, and the shutdown-veto signal
//! - [`Backend`]: the trait each platform backend implements (window
//!   creation, frame-rate control, cursor visibility, foreground query)
//! - [`ShouldQuitSignal`]: cooperative multicast poll used to veto shutdown
//! - [`WindowHandle`]: shared, reference-counted handle to a platform window
//!
//! Rendering, GPU context management, and input-event payloads are out of
//! scope; backends surface those through their own APIs.

pub mod app;
pub mod backend;
pub mod display;
pub mod error;
pub mod platform;
pub mod settings;
pub mod signal;
pub mod window;

// Re-export main types for convenience
pub use app::{App, AppDelegate, QuitDecision, cleanup_launch, prepare_launch};
pub use backend::Backend;
pub use display::Display;
pub use error::{AppError, WindowError};
pub use settings::Settings;
pub use signal::{ShouldQuitSignal, SubscriptionToken};
pub use window::{PlatformWindow, WeakWindowHandle, WindowFormat, WindowHandle, WindowId};

// Backends
#[cfg(feature = "desktop")]
pub use platform::desktop::{DesktopBackend, launch, launch_with_args};
pub use platform::headless::HeadlessBackend;
