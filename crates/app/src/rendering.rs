//! Painting helpers for the selection overlay.

use eframe::egui::{self, pos2, Color32, Rect};

/// The four rectangles tiling everything inside `bounds` but outside
/// `selection`: a band above, a band below, and the two side strips
/// between them. A selection touching an edge collapses that band to
/// zero area.
fn surround_bands(bounds: Rect, selection: Rect) -> [Rect; 4] {
    [
        // Above
        Rect::from_min_max(bounds.min, pos2(bounds.max.x, selection.min.y)),
        // Below
        Rect::from_min_max(pos2(bounds.min.x, selection.max.y), bounds.max),
        // Left strip
        Rect::from_min_max(
            pos2(bounds.min.x, selection.min.y),
            pos2(selection.min.x, selection.max.y),
        ),
        // Right strip
        Rect::from_min_max(
            pos2(selection.max.x, selection.min.y),
            pos2(bounds.max.x, selection.max.y),
        ),
    ]
}

/// Dims everything outside the selection, leaving the selected region
/// clear so the user sees exactly what will be captured.
pub fn draw_selection_overlay(
    painter: &egui::Painter,
    screen_rect: Rect,
    selection_rect: Rect,
    alpha: u8,
) {
    let dim = Color32::from_black_alpha(alpha);
    for band in surround_bands(screen_rect, selection_rect) {
        painter.rect_filled(band, 0.0, dim);
    }
}

/// Strokes the selection boundary.
pub fn draw_selection_border(
    painter: &egui::Painter,
    selection_rect: Rect,
    stroke_width: f32,
    color: Color32,
) {
    painter.rect_stroke(
        selection_rect,
        0.0,
        egui::Stroke::new(stroke_width, color),
        egui::StrokeKind::Middle,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_tile_everything_outside_the_selection() {
        let bounds = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        let selection = Rect::from_min_max(pos2(20.0, 30.0), pos2(70.0, 80.0));

        let covered: f32 = surround_bands(bounds, selection)
            .iter()
            .map(|r| r.area())
            .sum();
        assert_eq!(covered, bounds.area() - selection.area());
    }

    #[test]
    fn edge_touching_selection_collapses_its_band() {
        let bounds = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        let selection = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 40.0));

        let bands = surround_bands(bounds, selection);
        assert_eq!(bands[0].area(), 0.0);
        assert_eq!(bands[2].area(), 0.0);
        assert_eq!(bands[3].area(), 0.0);
        let covered: f32 = bands.iter().map(|r| r.area()).sum();
        assert_eq!(covered, bounds.area() - selection.area());
    }
}
