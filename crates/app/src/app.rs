//! Main application window and mode machine.
//!
//! The one native window serves two roles, as snipping tools usually do:
//! in `Control` mode it is the small question/capture panel; in
//! `Selecting` mode it hides, grabs the monitor, and reappears borderless
//! and fullscreen over a frozen copy of the screen so the user can drag a
//! rectangle on it. The response overlay is a separate always-on-top
//! viewport owned here.

use crate::overlay::{ERROR_MARKER, ResponseOverlay};
use crate::rendering::{draw_selection_border, draw_selection_overlay};
use crate::selection::DragTracker;
use crate::settings::Settings;
use crate::tray::{TrayAction, TrayHandle};
use eframe::egui;
use image::DynamicImage;
use snapask_core::{AppError, ScreenCapturer, Session, imaging};
use std::time::Duration;

fn capture_shortcut() -> egui::KeyboardShortcut {
    egui::KeyboardShortcut::new(
        egui::Modifiers::CTRL | egui::Modifiers::SHIFT,
        egui::Key::X,
    )
}

enum Mode {
    Control,
    Selecting,
}

pub struct SnapAskApp {
    session: Session,
    capturer: ScreenCapturer,
    monitor: usize,
    settings: Settings,

    // Control state
    query: String,
    status: String,
    show_settings: bool,

    // Selection state
    mode: Mode,
    frozen: Option<DynamicImage>,
    /// Pre-converted pixels for fast texture upload on the first overlay frame.
    color_image: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    tracker: DragTracker,

    response: ResponseOverlay,
    tray: Option<TrayHandle>,
    quitting: bool,
}

impl SnapAskApp {
    pub fn new(
        mut session: Session,
        capturer: ScreenCapturer,
        settings: Settings,
        monitor: usize,
    ) -> Self {
        if !settings.model.is_empty() {
            session.set_model(settings.model.clone());
        }

        let tray = match TrayHandle::new() {
            Ok(tray) => Some(tray),
            Err(e) => {
                log::warn!("Tray unavailable: {}", e);
                None
            }
        };

        Self {
            session,
            capturer,
            monitor,
            settings,
            query: String::new(),
            status: String::new(),
            show_settings: false,
            mode: Mode::Control,
            frozen: None,
            color_image: None,
            texture: None,
            tracker: DragTracker::default(),
            response: ResponseOverlay::new(),
            tray,
            quitting: false,
        }
    }

    fn pump_tray(&mut self, ctx: &egui::Context) {
        let actions = match &self.tray {
            Some(tray) => tray.pump(),
            None => return,
        };

        for action in actions {
            match action {
                TrayAction::Restore => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
                }
                TrayAction::Quit => {
                    self.quitting = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    /// Hides the window, freezes the monitor, and enters selection mode.
    fn start_capture(&mut self, ctx: &egui::Context) {
        self.session.begin_capture();
        self.status.clear();

        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        // Give the compositor time to actually hide the window before the grab.
        std::thread::sleep(Duration::from_millis(350));

        match self.capturer.capture_monitor(self.monitor) {
            Ok(frozen) => {
                let buffer = frozen.to_rgba8();
                let size = [frozen.width() as usize, frozen.height() as usize];
                let pixels = buffer.as_flat_samples();
                self.color_image = Some(egui::ColorImage::from_rgba_unmultiplied(
                    size,
                    pixels.as_slice(),
                ));
                self.texture = None;
                self.frozen = Some(frozen);
                self.tracker.reset();
                self.mode = Mode::Selecting;
                ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(false));
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
            }
            Err(e) => {
                log::error!("Capture failed: {}", e);
                self.status = format!("Capture failed: {}", e);
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
    }

    /// Leaves selection mode and restores the control window.
    fn exit_selection(&mut self, ctx: &egui::Context) {
        self.mode = Mode::Control;
        self.frozen = None;
        self.color_image = None;
        self.texture = None;
        self.tracker.reset();
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
    }

    /// Crops the frozen capture to the finalized selection and records
    /// the saved artifact.
    fn finish_selection(
        &mut self,
        ctx: &egui::Context,
        selection: egui::Rect,
        ui_size: egui::Vec2,
    ) {
        let crop_result = match self.frozen.as_ref() {
            Some(frozen) => imaging::crop_selection(frozen, selection, ui_size),
            None => Err(AppError::EmptySelection),
        };

        match crop_result.and_then(|cropped| self.session.record_selection(&cropped)) {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.status = format!("Captured {}", name);
            }
            Err(AppError::EmptySelection) => {
                log::warn!("Selection collapsed to zero area, nothing captured");
                self.status = "Selection was empty, nothing captured".to_string();
            }
            Err(e) => {
                log::error!("Failed to store selection: {}", e);
                self.status = format!("Failed to store selection: {}", e);
            }
        }

        self.exit_selection(ctx);
    }

    /// Sends the question and recorded capture, blocking the UI thread
    /// until the answer (or failure) comes back.
    fn send(&mut self) {
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {}", e);
        }

        let prompt = if self.query.trim().is_empty() {
            self.settings.default_prompt.clone()
        } else {
            self.query.clone()
        };

        match self.session.ask(&prompt) {
            Ok(answer) => {
                self.status.clear();
                self.response.display(answer);
            }
            Err(_) => {
                // Detail is already in the log; the user gets the fixed marker.
                self.status.clear();
                self.response.display(ERROR_MARKER);
            }
        }
    }

    fn control_frame(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&capture_shortcut())) {
            self.start_capture(ctx);
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Question:");
            ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .desired_width(f32::INFINITY)
                    .hint_text("e.g., What does this error mean?"),
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Capture region").clicked() {
                    self.start_capture(ui.ctx());
                }

                let can_send = self.session.screenshot().is_some();
                if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                    self.send();
                }

                if ui.button("⚙").clicked() {
                    self.show_settings = !self.show_settings;
                }
            });

            ui.add_space(6.0);
            match self.session.screenshot() {
                Some(path) => {
                    ui.label(
                        egui::RichText::new(format!("Captured: {}", path.display())).small(),
                    );
                }
                None => {
                    ui.label(
                        egui::RichText::new("No capture yet. Click Capture region or press Ctrl+Shift+X.")
                            .small(),
                    );
                }
            }

            if !self.status.is_empty() {
                ui.label(&self.status);
            }

            if self.show_settings {
                ui.separator();
                self.settings_ui(ui);
            }
        });
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Model:");
        if ui.text_edit_singleline(&mut self.settings.model).changed() {
            self.session.set_model(self.settings.model.clone());
        }

        ui.label("Default prompt (used when the question is empty):");
        ui.text_edit_singleline(&mut self.settings.default_prompt);
    }

    fn selection_frame(&mut self, ctx: &egui::Context) {
        // Upload the texture on the first overlay frame from pre-converted data
        if self.texture.is_none() {
            if let Some(color_image) = self.color_image.take() {
                self.texture = Some(ctx.load_texture(
                    "frozen_capture",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }

        let panel_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .outer_margin(egui::Margin::same(0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let rect = ui.max_rect();

                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                let response = ui.interact(rect, ui.id(), egui::Sense::drag());

                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.tracker.press(pos);
                    }
                } else if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.tracker.drag(pos);
                    }
                } else if response.drag_stopped() {
                    if let Some(selection) = self.tracker.release() {
                        self.finish_selection(ctx, selection, rect.size());
                        return;
                    }
                    // Too-short drags reset silently; the overlay stays open.
                }

                match self.tracker.active_rect() {
                    Some(selection) => {
                        draw_selection_overlay(ui.painter(), rect, selection, 150);
                        draw_selection_border(
                            ui.painter(),
                            selection,
                            2.0,
                            egui::Color32::WHITE,
                        );
                    }
                    None => {
                        ui.painter().text(
                            egui::pos2(rect.center().x, rect.min.y + 32.0),
                            egui::Align2::CENTER_CENTER,
                            "Drag to select a region. Esc cancels.",
                            egui::FontId::proportional(18.0),
                            egui::Color32::WHITE,
                        );
                    }
                }

                if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                    log::info!("Selection cancelled");
                    self.exit_selection(ctx);
                }
            });
    }
}

impl eframe::App for SnapAskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Keep polling tray events even while the window sits hidden.
        ctx.request_repaint_after(Duration::from_millis(200));
        self.pump_tray(ctx);

        if ctx.input(|i| i.viewport().close_requested())
            && !self.quitting
            && self.tray.is_some()
            && matches!(self.mode, Mode::Control)
        {
            // Closing the window parks it in the tray; Quit lives in the tray menu.
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        }

        match self.mode {
            Mode::Control => self.control_frame(ctx),
            Mode::Selecting => self.selection_frame(ctx),
        }

        self.response.show(ctx);
    }
}
