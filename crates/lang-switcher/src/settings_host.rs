//! Host side of the settings bridge.
//!
//! Applies `set_var` requests to the var store and turns accepted changes
//! into side effects. A chord change is forwarded to the main thread, which
//! re-registers the hotkey and only then publishes it to the listener.

use crate::UiCommand;

use lang_switcher_core::{
    Activation, HostRejection, HostRequest, HostSettings, SET_VAR, SettingChange,
};

use tracing::{info, instrument, warn};

/// What to do when the last settings page closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Keep running with only the tray icon visible.
    HideToTray,
    /// Terminate the process.
    Exit,
}

/// Owns the host var store and the channel its changes fan out to.
pub struct SettingsHost {
    settings: HostSettings,
    ui_tx: std::sync::mpsc::Sender<UiCommand>,
}

impl SettingsHost {
    /// Create a host with default settings, matching the chord the main
    /// thread registers at startup.
    pub fn new(ui_tx: std::sync::mpsc::Sender<UiCommand>) -> Self {
        Self {
            settings: HostSettings::default(),
            ui_tx,
        }
    }

    /// Current var store contents.
    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Apply one request and answer on its reply channel.
    ///
    /// The reply is best-effort: panels that do not watch outcomes have
    /// already dropped the receiver.
    #[instrument(skip(self, request), fields(command = SET_VAR, key = %request.command.key))]
    pub fn handle_request(&mut self, request: HostRequest) {
        let HostRequest { command, reply } = request;
        let previous = self.settings.activation();

        let result = match self.settings.apply(&command) {
            Ok(change) => {
                self.on_change(change, previous);
                Ok(change)
            }
            Err(e) => {
                warn!(error = %e, val = %command.val, "Rejected settings command");
                Err(HostRejection {
                    reason: e.to_string(),
                })
            }
        };

        let _ = reply.send(result);
    }

    /// Decide what closing the settings page means right now.
    pub fn on_settings_closed(&self) -> CloseAction {
        if self.settings.close_to_tray() {
            CloseAction::HideToTray
        } else {
            CloseAction::Exit
        }
    }

    fn on_change(&self, change: SettingChange, previous: Activation) {
        match change {
            SettingChange::Activation(activation) => {
                if activation != previous {
                    info!(chord = activation.chord_label(), "Activation chord changed");
                    if self.ui_tx.send(UiCommand::RebindHotkey(activation)).is_err() {
                        warn!("UI thread gone, hotkey not rebound");
                    }
                }
            }
            SettingChange::CloseToTray(enabled) => {
                info!(close_to_tray = enabled, "Close-to-tray updated");
            }
        }
    }
}
