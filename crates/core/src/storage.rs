//! Screenshot artifact storage.
//!
//! Every capture is written to a local folder under a freshly generated
//! v4 UUID, so repeated captures never collide. Artifacts are kept for
//! the life of the process and never cleaned up.

use crate::error::{AppError, Result};
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes screenshot artifacts into a local folder.
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl ScreenshotStore {
    /// Creates a store rooted at `dir`. The folder itself is created
    /// lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the folder artifacts are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves a cropped capture as `<uuid>.png` and returns the path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] when the folder cannot be created and
    /// [`AppError::ImageProcessing`] when PNG encoding fails.
    pub fn save(&self, image: &DynamicImage) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(format!("{}.png", Uuid::new_v4()));
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| AppError::image(format!("Failed to save screenshot: {}", e)))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn temp_store() -> ScreenshotStore {
        ScreenshotStore::new(
            std::env::temp_dir().join(format!("snapask-store-{}", Uuid::new_v4())),
        )
    }

    #[test]
    fn save_creates_folder_and_png() {
        let store = temp_store();
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));

        let path = store.save(&img).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(path.parent(), Some(store.dir()));
    }

    #[test]
    fn repeated_saves_get_unique_names() {
        let store = temp_store();
        let img = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));

        let first = store.save(&img).unwrap();
        let second = store.save(&img).unwrap();
        assert_ne!(first, second);
    }
}
