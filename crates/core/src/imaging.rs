//! Selection cropping and artifact encoding.
//!
//! The overlay reports selections in UI (logical) coordinates while the
//! frozen capture may be at a different resolution on HiDPI displays, so
//! the crop first maps the rectangle into image space and clamps it to the
//! image bounds. Encoding reads the saved PNG artifact back from disk and
//! wraps it in a base64 data URI for the API request.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use eframe::egui;
use image::DynamicImage;
use std::fs;
use std::path::Path;

/// Crops the frozen capture to the user's selection.
///
/// `selection` and `ui_size` are in UI coordinates; the function scales
/// them into image coordinates, clamps to the image bounds, and rejects
/// selections that collapse to zero area.
///
/// # Errors
///
/// Returns [`AppError::EmptySelection`] when the mapped rectangle has no
/// area left after clamping.
pub fn crop_selection(
    original: &DynamicImage,
    selection: egui::Rect,
    ui_size: egui::Vec2,
) -> Result<DynamicImage> {
    let scale_x = original.width() as f32 / ui_size.x;
    let scale_y = original.height() as f32 / ui_size.y;

    let x = (selection.min.x * scale_x).max(0.0) as u32;
    let y = (selection.min.y * scale_y).max(0.0) as u32;

    let mut width = (selection.width() * scale_x) as u32;
    let mut height = (selection.height() * scale_y) as u32;

    // Clamp to image bounds to prevent out-of-bounds crops
    if x + width > original.width() {
        width = original.width().saturating_sub(x);
    }
    if y + height > original.height() {
        height = original.height().saturating_sub(y);
    }

    if width == 0 || height == 0 {
        return Err(AppError::EmptySelection);
    }

    Ok(original.crop_imm(x, y, width, height))
}

/// Reads a saved PNG artifact and encodes it as a `data:image/png;base64,`
/// URI suitable for an `image_url` content part.
///
/// # Errors
///
/// Returns [`AppError::Io`] when the artifact cannot be read.
pub fn png_data_uri(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2, Rect};
    use image::RgbaImage;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
    }

    #[test]
    fn crop_maps_ui_coordinates_to_image_space() {
        // Image is twice the UI resolution, as on a 2x HiDPI display.
        let img = test_image(200, 200);
        let selection = Rect::from_min_max(pos2(10.0, 10.0), pos2(60.0, 40.0));

        let cropped = crop_selection(&img, selection, vec2(100.0, 100.0)).unwrap();
        assert_eq!(cropped.width(), 100);
        assert_eq!(cropped.height(), 60);
    }

    #[test]
    fn crop_clamps_to_image_bounds() {
        let img = test_image(100, 100);
        let selection = Rect::from_min_max(pos2(80.0, 80.0), pos2(150.0, 150.0));

        let cropped = crop_selection(&img, selection, vec2(100.0, 100.0)).unwrap();
        assert_eq!(cropped.width(), 20);
        assert_eq!(cropped.height(), 20);
    }

    #[test]
    fn crop_rejects_zero_area_selection() {
        let img = test_image(100, 100);
        let selection = Rect::from_min_max(pos2(50.0, 50.0), pos2(50.0, 50.0));

        let result = crop_selection(&img, selection, vec2(100.0, 100.0));
        assert!(matches!(result, Err(AppError::EmptySelection)));
    }

    #[test]
    fn crop_rejects_selection_fully_outside_image() {
        let img = test_image(100, 100);
        let selection = Rect::from_min_max(pos2(120.0, 120.0), pos2(140.0, 140.0));

        let result = crop_selection(&img, selection, vec2(100.0, 100.0));
        assert!(matches!(result, Err(AppError::EmptySelection)));
    }

    #[test]
    fn data_uri_has_png_header_and_base64_payload() {
        let dir = std::env::temp_dir().join(format!("snapask-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("artifact.png");
        test_image(4, 4).save_with_format(&path, image::ImageFormat::Png).unwrap();

        let uri = png_data_uri(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = uri.trim_start_matches("data:image/png;base64,");
        let decoded = BASE64.decode(payload).unwrap();
        // PNG magic bytes
        assert_eq!(&decoded[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn data_uri_fails_for_missing_artifact() {
        let path = std::env::temp_dir().join("snapask-does-not-exist.png");
        assert!(matches!(png_data_uri(&path), Err(AppError::Io(_))));
    }
}
