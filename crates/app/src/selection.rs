//! Drag tracking for the selection overlay.
//!
//! The tracker is a pure state machine fed with pointer positions; the
//! overlay translates egui drag events into `press`/`drag`/`release`
//! calls and consumes the finalized rectangle from the release
//! transition.

use eframe::egui;

/// Minimum distance (in logical pixels) for a drag to count as a
/// selection rather than an accidental click.
pub const MIN_SELECTION_DISTANCE: f32 = 10.0;

/// Tracks one rectangle drag from press to release.
#[derive(Default)]
pub struct DragTracker {
    start: Option<egui::Pos2>,
    current: Option<egui::Pos2>,
}

impl DragTracker {
    /// Anchors a new selection at the press point.
    pub fn press(&mut self, pos: egui::Pos2) {
        self.start = Some(pos);
        self.current = Some(pos);
    }

    /// Extends the active selection to the current pointer position.
    /// Ignored when no press preceded it.
    pub fn drag(&mut self, pos: egui::Pos2) {
        if self.start.is_some() {
            self.current = Some(pos);
        }
    }

    /// Finalizes the drag.
    ///
    /// Returns the normalized rectangle (non-negative width and height
    /// regardless of drag direction), or `None` when the drag was too
    /// short to be intentional. The tracker resets either way, so a
    /// too-short drag simply leaves the overlay ready for another
    /// attempt.
    pub fn release(&mut self) -> Option<egui::Rect> {
        let start = self.start.take()?;
        let end = self.current.take()?;

        if start.distance(end) > MIN_SELECTION_DISTANCE {
            Some(egui::Rect::from_two_pos(start, end))
        } else {
            None
        }
    }

    /// The in-progress rectangle, for drawing while the drag is active.
    pub fn active_rect(&self) -> Option<egui::Rect> {
        match (self.start, self.current) {
            (Some(start), Some(current)) => Some(egui::Rect::from_two_pos(start, current)),
            _ => None,
        }
    }

    /// Discards any in-progress drag.
    pub fn reset(&mut self) {
        self.start = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn reverse_drag_yields_normalized_rect() {
        let mut tracker = DragTracker::default();
        tracker.press(pos2(300.0, 300.0));
        tracker.drag(pos2(100.0, 100.0));

        let rect = tracker.release().unwrap();
        assert_eq!(rect.min, pos2(100.0, 100.0));
        assert_eq!(rect.width(), 200.0);
        assert_eq!(rect.height(), 200.0);
    }

    #[test]
    fn forward_drag_yields_same_rect_as_reverse() {
        let mut forward = DragTracker::default();
        forward.press(pos2(100.0, 100.0));
        forward.drag(pos2(300.0, 300.0));

        let mut reverse = DragTracker::default();
        reverse.press(pos2(300.0, 300.0));
        reverse.drag(pos2(100.0, 100.0));

        assert_eq!(forward.release(), reverse.release());
    }

    #[test]
    fn tiny_drag_is_discarded_and_tracker_resets() {
        let mut tracker = DragTracker::default();
        tracker.press(pos2(50.0, 50.0));
        tracker.drag(pos2(53.0, 52.0));

        assert_eq!(tracker.release(), None);
        assert_eq!(tracker.active_rect(), None);
    }

    #[test]
    fn release_without_press_is_none() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut tracker = DragTracker::default();
        tracker.drag(pos2(10.0, 10.0));
        assert_eq!(tracker.active_rect(), None);
    }

    #[test]
    fn active_rect_follows_the_pointer() {
        let mut tracker = DragTracker::default();
        tracker.press(pos2(10.0, 10.0));
        tracker.drag(pos2(40.0, 30.0));

        let rect = tracker.active_rect().unwrap();
        assert_eq!(rect.min, pos2(10.0, 10.0));
        assert_eq!(rect.max, pos2(40.0, 30.0));
    }
}
