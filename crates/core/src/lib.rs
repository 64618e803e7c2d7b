//! SnapAsk Core Library
//!
//! Core functionality for the SnapAsk screen-query tool: capture a region
//! of the screen, save it as a PNG artifact, and ask a vision-capable
//! chat-completion API about it.
//!
//! # Overview
//!
//! The library handles everything below the UI:
//!
//! - **Screen Capture**: monitor enumeration and full-screen grabs via
//!   [`capture`]
//! - **Imaging**: selection cropping and data-URI encoding via [`imaging`]
//! - **Artifacts**: uniquely named PNG files via [`storage`]
//! - **Remote API**: the chat-completion client via [`api`]
//! - **Session**: the owning controller for the capture → send cycle via
//!   [`session`]
//! - **Logging**: the append-only process log via [`logging`]
//!
//! # Quick Start
//!
//! ```ignore
//! use snapask_core::{Config, ScreenCapturer, Session};
//!
//! snapask_core::init();
//! let config = Config::load()?;
//! let capturer = ScreenCapturer::new()?;
//! let mut session = Session::new(&config, "screens")?;
//!
//! let frozen = capturer.capture_monitor(0)?;
//! // ... user selects a region, producing `cropped` ...
//! # let cropped = frozen.clone();
//! session.record_selection(&cropped)?;
//! let answer = session.ask("What is shown here?")?;
//! ```

pub mod api;
pub mod capture;
pub mod config;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export primary types for convenience
pub use api::VisionClient;
pub use capture::ScreenCapturer;
pub use config::Config;
pub use error::{AppError, Result};
pub use session::Session;
pub use storage::ScreenshotStore;

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup; it loads a local `.env` file if
/// one is present.
pub fn init() {
    let _ = dotenvy::dotenv();
}
