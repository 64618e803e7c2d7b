//! Tray affordance: restore-from-tray and quit.
//!
//! The icon lives for the whole run; closing the main window hides it to
//! the tray, and either the Restore menu item or a left-click brings it
//! back. Events are polled each frame rather than pumped on a dedicated
//! thread.

use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

/// Actions the tray can request from the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayAction {
    Restore,
    Quit,
}

pub struct TrayHandle {
    _tray: TrayIcon,
    restore_item: MenuItem,
    quit_item: MenuItem,
}

impl TrayHandle {
    pub fn new() -> anyhow::Result<Self> {
        let menu = Menu::new();
        let restore = MenuItem::new("Restore", true, None);
        let quit = MenuItem::new("Quit", true, None);
        let sep = PredefinedMenuItem::separator();
        menu.append_items(&[&restore, &sep, &quit])?;

        let icon = Icon::from_rgba(dot_icon_rgba(), ICON_SIZE as u32, ICON_SIZE as u32)?;

        let tray = TrayIconBuilder::new()
            .with_tooltip("SnapAsk")
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()?;

        Ok(Self {
            _tray: tray,
            restore_item: restore,
            quit_item: quit,
        })
    }

    /// Non-blocking poll of menu and icon events.
    pub fn pump(&self) -> Vec<TrayAction> {
        let mut actions = Vec::new();

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if event.id() == self.quit_item.id() {
                log::info!("Tray: Quit selected");
                actions.push(TrayAction::Quit);
            } else if event.id() == self.restore_item.id() {
                log::info!("Tray: Restore selected");
                actions.push(TrayAction::Restore);
            }
        }

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                actions.push(TrayAction::Restore);
            }
        }

        actions
    }
}

const ICON_SIZE: usize = 16;

// Solid 16x16 amber dot; no asset file to ship.
fn dot_icon_rgba() -> Vec<u8> {
    let mut rgba = vec![0u8; ICON_SIZE * ICON_SIZE * 4];
    for pixel in rgba.chunks_exact_mut(4) {
        pixel[0] = 0xE8;
        pixel[1] = 0xA3;
        pixel[2] = 0x2C;
        pixel[3] = 0xFF;
    }
    rgba
}
