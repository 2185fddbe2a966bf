use crate::{
    AppCommand, AppResult, SelectionConverter, SettingsHost, UiCommand, config::Config,
    settings_host::CloseAction,
};

use lang_switcher_core::{Activation, HostRequest};

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, mpsc, watch},
    task::JoinHandle,
};
use tracing::{error, info, instrument, warn};
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent, menu::MenuEvent};

/// Whether a click on the tray icon itself should open the settings page.
///
/// A plain left click does, once the button is released.
pub fn opens_settings(button: MouseButton, state: MouseButtonState) -> bool {
    matches!((button, state), (MouseButton::Left, MouseButtonState::Up))
}

/// Main application state.
///
/// Runs on the async runtime thread. Hotkey rebinding and shutdown go back
/// to the main thread through `ui_tx` because the hotkey manager and
/// `TrayIcon` must stay on the UI thread.
pub struct App {
    pub(crate) converter: Arc<Mutex<SelectionConverter>>,
    pub(crate) host: SettingsHost,
    pub(crate) ui_tx: std::sync::mpsc::Sender<UiCommand>,
    pub(crate) config: Arc<Config>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) host_rx: mpsc::UnboundedReceiver<HostRequest>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) settings_menu_id: tray_icon::menu::MenuId,
    pub(crate) exit_menu_id: tray_icon::menu::MenuId,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("LangSwitcher starting");

        let (mut menu_event_rx, menu_handle) =
            forward_blocking(|| MenuEvent::receiver().recv().ok());
        let (mut icon_event_rx, icon_handle) =
            forward_blocking(|| TrayIconEvent::receiver().recv().ok());

        loop {
            tokio::select! {
                Some(event) = menu_event_rx.recv() => {
                    self.handle_tray_event(event).await;
                }

                Some(event) = icon_event_rx.recv() => {
                    if let TrayIconEvent::Click { button, button_state, .. } = event
                        && opens_settings(button, button_state)
                    {
                        self.open_settings();
                    }
                }

                Some(request) = self.host_rx.recv() => {
                    self.host.handle_request(request);
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::ConvertSelection(activation) => {
                            self.convert_selection(activation)
                        }
                        AppCommand::SettingsClosed => {
                            if self.host.on_settings_closed() == CloseAction::Exit {
                                info!("Settings closed with close-to-tray off, exiting");
                                break;
                            }
                            info!(
                                chord = self.host.settings().activation().chord_label(),
                                "Settings closed, staying in tray"
                            );
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(menu_event_rx);
        drop(icon_event_rx);
        stop_forwarder("Tray menu", menu_handle).await;
        stop_forwarder("Tray icon", icon_handle).await;

        let _ = self.shutdown_tx.send(true);
        let _ = self.ui_tx.send(UiCommand::Shutdown);
        info!("LangSwitcher shut down successfully");

        Ok(())
    }

    /// Convert the current selection in the background.
    ///
    /// Runs off the loop so settings commands keep flowing while the
    /// clipboard round-trip sleeps. Presses during a running conversion
    /// queue on the converter lock.
    #[instrument(skip(self))]
    fn convert_selection(&self, activation: Activation) {
        let converter = Arc::clone(&self.converter);

        tokio::task::spawn(async move {
            let mut converter = converter.lock().await;
            if let Err(e) = converter.convert_selection(activation).await {
                error!(error = ?e, "Selection conversion failed");
            }
        });
    }

    /// Handle tray menu events.
    #[instrument(skip(self))]
    async fn handle_tray_event(&mut self, event: MenuEvent) {
        let event_id = &event.id;

        if *event_id == self.settings_menu_id {
            self.open_settings();
        } else if *event_id == self.exit_menu_id {
            info!("Exit requested from tray menu");
            if let Err(e) = self.command_tx.send(AppCommand::Shutdown).await {
                error!(error = ?e, "Failed to send shutdown command");
            }
        }
    }

    fn open_settings(&self) {
        let url = self.config.settings_url();
        if let Err(e) = open::that(&url) {
            warn!(error = %e, url = %url, "Failed to open settings page");
            return;
        }
        info!("Opened settings page");
    }
}

/// Forward a blocking event source into an async channel.
///
/// The task ends on the first `blocking_send` after the receiver is dropped.
fn forward_blocking<T, F>(mut next: F) -> (mpsc::Receiver<T>, JoinHandle<()>)
where
    T: Send + 'static,
    F: FnMut() -> Option<T> + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(32);
    let handle = tokio::task::spawn_blocking(move || {
        while let Some(event) = next() {
            if event_tx.blocking_send(event).is_err() {
                break;
            }
        }
    });

    (event_rx, handle)
}

async fn stop_forwarder(name: &str, handle: JoinHandle<()>) {
    match tokio::time::timeout(Duration::from_secs(1), handle).await {
        Ok(Ok(())) => info!(forwarder = name, "Event forwarder stopped cleanly"),
        Ok(Err(e)) => error!(forwarder = name, error = ?e, "Event forwarder task panicked"),
        Err(_) => info!(
            forwarder = name,
            "Event forwarder did not stop within timeout, will be cleaned up on exit"
        ),
    }
}
