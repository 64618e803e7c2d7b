//! The owning controller for one capture → send → display cycle.
//!
//! [`Session`] holds the pieces the source tool kept as implicit global
//! state: the recorded artifact path, the HTTP client, the async runtime,
//! and the artifact store. The capture flow writes the path, the send flow
//! reads it; both run on the UI thread, never interleaved.

use crate::api::VisionClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::imaging;
use crate::storage::ScreenshotStore;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Session controller owning the artifact path and the request cycle.
pub struct Session {
    client: VisionClient,
    store: ScreenshotStore,
    runtime: tokio::runtime::Runtime,
    screenshot: Option<PathBuf>,
}

impl Session {
    /// Builds a session from the loaded configuration, storing artifacts
    /// under `screens_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] when the async runtime cannot be built.
    pub fn new(config: &Config, screens_dir: impl Into<PathBuf>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            client: VisionClient::new(config),
            store: ScreenshotStore::new(screens_dir),
            runtime,
            screenshot: None,
        })
    }

    /// Path of the artifact recorded by the last completed selection.
    pub fn screenshot(&self) -> Option<&Path> {
        self.screenshot.as_deref()
    }

    /// Returns the model submitted with each request.
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Replaces the model submitted with each request.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.client.set_model(model);
    }

    /// Starts a new capture cycle.
    ///
    /// Clears the recorded artifact path so a cancelled selection can
    /// never fall back to a stale capture.
    pub fn begin_capture(&mut self) {
        self.screenshot = None;
    }

    /// Saves the cropped selection and records its path.
    pub fn record_selection(&mut self, cropped: &DynamicImage) -> Result<PathBuf> {
        let path = self.store.save(cropped)?;
        log::info!("Screenshot saved at {}", path.display());
        self.screenshot = Some(path.clone());
        Ok(path)
    }

    /// Sends the question and the recorded artifact to the vision API,
    /// blocking the calling thread until the answer arrives.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoCapture`] when no selection has been recorded
    /// in this cycle, [`AppError::Api`] on transport failures, and
    /// [`AppError::NoAnswer`] when the response carries no choices.
    pub fn ask(&self, prompt: &str) -> Result<String> {
        log::info!("Submitting query (model: {})", self.client.model());

        let result = self.try_ask(prompt);
        match &result {
            Ok(answer) => log::info!("Received answer ({} chars)", answer.len()),
            Err(e) => log::error!("Query failed: {}", e),
        }

        result
    }

    fn try_ask(&self, prompt: &str) -> Result<String> {
        let path = self.screenshot.as_deref().ok_or(AppError::NoCapture)?;
        let image_uri = imaging::png_data_uri(path)?;
        self.runtime.block_on(self.client.ask(prompt, &image_uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn test_session() -> Session {
        let config = Config {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            api_base: "https://example.invalid/v1".to_string(),
        };
        let dir = std::env::temp_dir().join(format!("snapask-session-{}", uuid::Uuid::new_v4()));
        Session::new(&config, dir).unwrap()
    }

    #[test]
    fn ask_without_capture_is_guarded() {
        let session = test_session();
        assert!(matches!(session.ask("what is this"), Err(AppError::NoCapture)));
    }

    #[test]
    fn record_selection_sets_the_artifact_path() {
        let mut session = test_session();
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));

        let path = session.record_selection(&img).unwrap();
        assert_eq!(session.screenshot(), Some(path.as_path()));
    }

    #[test]
    fn begin_capture_clears_a_previous_recording() {
        let mut session = test_session();
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        session.record_selection(&img).unwrap();

        session.begin_capture();
        assert!(session.screenshot().is_none());
        // A send after a cancelled selection must not reuse the old path.
        assert!(matches!(session.ask("anything"), Err(AppError::NoCapture)));
    }
}
