//! System tray icon with the Settings and Exit menu.
//!
//! The menu opens on right click; a left click opens the settings page.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const TOOLTIP: &str = "LangSwitcher";

/// System tray icon manager.
///
/// Never read after construction, but must stay alive: dropping the
/// `TrayIcon` removes it from the tray.
pub struct TrayManager {
    _tray_icon: TrayIcon,
    settings_item_id: MenuId,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create the tray icon and its menu.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let settings_item = MenuItem::new("Settings", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let settings_id = settings_item.id().clone();
        let exit_id = exit_item.id().clone();

        menu.append(&settings_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add settings menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to add menu separator: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        menu.append(&exit_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(TOOLTIP)
            .with_menu(Box::new(menu))
            .with_menu_on_left_click(false)
            .with_icon(Self::load_icon()?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            _tray_icon: tray_icon,
            settings_item_id: settings_id,
            exit_item_id: exit_id,
        })
    }

    /// Load icon from compile-time embedded PNG bytes.
    #[track_caller]
    fn load_icon() -> AppResult<Icon> {
        let png_bytes: &[u8] = include_bytes!("../resources/icons/tray.png");

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::TrayError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the settings menu item ID.
    pub fn settings_item_id(&self) -> &MenuId {
        &self.settings_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
