//! The response overlay: a borderless always-on-top panel for answers.
//!
//! The overlay is constructed with the app and starts hidden; there is no
//! lazily created window to wonder about. `display` replaces whatever was
//! shown before, so repeated answers reuse the same panel.

use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

/// Fixed marker shown when the remote call fails or returns no choices.
/// Detail lives only in the log file.
pub const ERROR_MARKER: &str = "Error: no answer received. Check the log file for details.";

/// Floating answer panel, rendered as its own viewport.
pub struct ResponseOverlay {
    text: String,
    open: bool,
    markdown_cache: CommonMarkCache,
}

impl ResponseOverlay {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            open: false,
            markdown_cache: CommonMarkCache::default(),
        }
    }

    /// Replaces the panel content and shows it. Calling this again with
    /// the same text changes nothing the user can see.
    pub fn display(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the overlay viewport. Call once per frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut close = false;

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("snapask_response"),
            egui::ViewportBuilder::default()
                .with_title("SnapAsk Answer")
                .with_inner_size([440.0, 320.0])
                .with_decorations(false)
                .with_always_on_top(),
            |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Answer");
                    ui.separator();

                    egui::ScrollArea::vertical()
                        .max_height(230.0)
                        .show(ui, |ui| {
                            CommonMarkViewer::new().show(ui, &mut self.markdown_cache, &self.text);
                        });

                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("Copy").clicked() {
                            if let Ok(mut clipboard) = arboard::Clipboard::new() {
                                let _ = clipboard.set_text(self.text.clone());
                            }
                        }
                        if ui.button("Close").clicked() {
                            close = true;
                        }
                    });
                });

                if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.viewport().close_requested())
                {
                    close = true;
                }
            },
        );

        if close {
            self.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_the_panel_with_the_given_text() {
        let mut overlay = ResponseOverlay::new();
        assert!(!overlay.is_open());

        overlay.display("first answer");
        assert!(overlay.is_open());
        assert_eq!(overlay.text(), "first answer");
    }

    #[test]
    fn repeated_display_with_same_text_is_idempotent() {
        let mut overlay = ResponseOverlay::new();
        overlay.display("same");
        let after_one = (overlay.text().to_string(), overlay.is_open());

        for _ in 0..5 {
            overlay.display("same");
        }
        assert_eq!((overlay.text().to_string(), overlay.is_open()), after_one);
    }

    #[test]
    fn display_replaces_previous_text() {
        let mut overlay = ResponseOverlay::new();
        overlay.display("old");
        overlay.display("new");
        assert_eq!(overlay.text(), "new");
    }
}
