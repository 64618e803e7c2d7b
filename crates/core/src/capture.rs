//! Monitor enumeration and full-screen capture.
//!
//! The selection workflow freezes one monitor as a [`DynamicImage`]; the
//! overlay paints that frozen capture and the final crop is taken from it,
//! so nothing here grabs partial regions of a live screen.

use crate::error::{AppError, Result};
use image::DynamicImage;
use screenshots::Screen;

/// Enumerates the attached monitors and captures them on demand.
pub struct ScreenCapturer {
    screens: Vec<Screen>,
}

impl ScreenCapturer {
    /// Detects the available monitors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ScreenCapture`] when enumeration fails (for
    /// example with no display server) or no monitors are present.
    pub fn new() -> Result<Self> {
        let screens = Screen::all()
            .map_err(|e| AppError::capture(format!("Failed to enumerate monitors: {}", e)))?;

        if screens.is_empty() {
            return Err(AppError::capture("No monitors detected"));
        }

        Ok(Self { screens })
    }

    /// Human-readable descriptions of the attached monitors.
    pub fn describe_monitors(&self) -> Vec<String> {
        self.screens
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "Monitor {}: {}x{}, scale {}",
                    i, s.display_info.width, s.display_info.height, s.display_info.scale_factor
                )
            })
            .collect()
    }

    /// Returns the number of attached monitors.
    pub fn monitor_count(&self) -> usize {
        self.screens.len()
    }

    /// Captures a whole monitor by its zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MonitorNotFound`] for an out-of-range index and
    /// [`AppError::ScreenCapture`] when the grab itself fails.
    pub fn capture_monitor(&self, index: usize) -> Result<DynamicImage> {
        let screen = self
            .screens
            .get(index)
            .ok_or(AppError::MonitorNotFound(index))?;

        let captured = screen
            .capture()
            .map_err(|e| AppError::capture(format!("Failed to capture monitor: {}", e)))?;

        let width = captured.width();
        let height = captured.height();
        let rgba_data = captured.into_raw();

        let buffer = image::ImageBuffer::from_raw(width, height, rgba_data)
            .ok_or_else(|| AppError::capture("Capture returned a malformed pixel buffer"))?;

        Ok(DynamicImage::ImageRgba8(buffer))
    }
}
