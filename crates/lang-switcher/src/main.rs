//! LangSwitcher: fix text typed in the wrong keyboard layout with a global
//! hotkey, configured from a small settings page.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod modifier_key_guard;
mod selection_converter;
mod settings_host;
mod settings_server;
mod tray_manager;
mod ui_command;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::{ChordBinding, HotkeyHandler},
    modifier_key_guard::ModifierKeyGuard,
    selection_converter::SelectionConverter,
    settings_host::SettingsHost,
    settings_server::SettingsServer,
    tray_manager::TrayManager,
    ui_command::UiCommand,
};

use crate::config::{Config, DEFAULT_LOG_FILTER};

use lang_switcher_core::Activation;

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let config = Config::load();

    let filter = match &config {
        Ok(c) => c.logging.filter.clone(),
        Err(_) => DEFAULT_LOG_FILTER.to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let mut config = match config {
        Ok(c) => Some(c),
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<UiCommand>::with_user_event().build();
    let ui_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations; dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let (mut chord_binding, activation_rx) = ChordBinding::new(Activation::default());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                UiCommand::RebindHotkey(activation) => {
                    if let Some(manager) = &hotkey_manager
                        && let Err(e) = chord_binding.rebind(manager, activation)
                    {
                        error!(
                            error = ?e,
                            bound = chord_binding.bound().chord_label(),
                            "Failed to rebind hotkey, keeping the previous chord"
                        );
                    }
                }
                UiCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::NewEvents(StartCause::Init) => {
                let Some(config) = config.take() else {
                    return;
                };

                let converter =
                    match SelectionConverter::new(config.behavior.clipboard_settle()) {
                        Ok(sc) => Arc::new(Mutex::new(sc)),
                        Err(e) => {
                            error!("Failed to create SelectionConverter: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                // Register on the main thread. tao's event loop pumps the
                // Windows messages needed for WM_HOTKEY delivery.
                hotkey_manager = match HotkeyHandler::register_hotkey(chord_binding.bound()) {
                    Ok(manager) => Some(manager),
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let config = Arc::new(config);
                let (command_tx, command_rx) = mpsc::channel(32);
                let (host_tx, host_rx) = mpsc::unbounded_channel();
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                let activation_rx = activation_rx.clone();

                // EventLoopProxy wakes the loop; the runtime side only needs
                // a plain Sender.
                let (ui_tx, ui_rx) = std::sync::mpsc::channel::<UiCommand>();
                let ui_proxy = ui_proxy.clone();
                std::thread::spawn(move || {
                    for cmd in ui_rx {
                        if ui_proxy.send_event(cmd).is_err() {
                            break;
                        }
                    }
                });

                let settings_menu_id = tray_manager.settings_item_id().clone();
                let exit_menu_id = tray_manager.exit_item_id().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler = HotkeyHandler::new(activation_rx, command_tx.clone());
                        let server = SettingsServer::new(
                            config.server.port,
                            config.behavior.open_settings_on_start,
                            host_tx,
                            command_tx.clone(),
                        );

                        let app = App {
                            converter,
                            host: SettingsHost::new(ui_tx.clone()),
                            ui_tx: ui_tx.clone(),
                            config,
                            command_tx: command_tx.clone(),
                            command_rx,
                            host_rx,
                            shutdown_tx,
                            settings_menu_id,
                            exit_menu_id,
                        };

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx.clone()).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = server.run(shutdown_rx.clone()).await {
                                    error!(error = ?e, "Settings server error");
                                    let _ = command_tx.send(AppCommand::Shutdown).await;
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );

                        info!("Runtime tasks finished");
                    });
                });
            }
            _ => {}
        }

        // Keep tray_manager and hotkey_manager alive in the closure for the
        // app's lifetime.
        let _ = (&tray_manager, &hotkey_manager);
    });
}
