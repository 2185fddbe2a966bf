use crate::{Activation, Command, CoreResult, SettingKey, SettingsError, decode_bool};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// A setting value the host accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    /// New activation chord.
    Activation(Activation),
    /// New close-to-tray flag.
    CloseToTray(bool),
}

/// Host-side key/value store the `set_var` commands write into.
///
/// Starts from the same defaults the settings panel shows on first load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSettings {
    activation: Activation,
    close_to_tray: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            activation: Activation::C,
            close_to_tray: true,
        }
    }
}

impl HostSettings {
    /// Currently bound activation chord.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Whether closing the settings window keeps the process in the tray.
    pub fn close_to_tray(&self) -> bool {
        self.close_to_tray
    }

    /// Apply a typed command. A rejected command changes nothing.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: &Command) -> CoreResult<SettingChange> {
        let change = match command.key {
            SettingKey::Activation => {
                let activation = command.val.parse::<Activation>().map_err(|_| {
                    SettingsError::InvalidValue {
                        key: SettingKey::Activation.as_str(),
                        value: command.val.clone(),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;
                self.activation = activation;
                SettingChange::Activation(activation)
            }
            SettingKey::CloseToTray => {
                let enabled = decode_bool(SettingKey::CloseToTray, &command.val)?;
                self.close_to_tray = enabled;
                SettingChange::CloseToTray(enabled)
            }
        };

        info!(key = %command.key, val = %command.val, "Setting applied");

        Ok(change)
    }

    /// Apply a command given as raw wire strings.
    #[track_caller]
    pub fn apply_raw(&mut self, key: &str, val: &str) -> CoreResult<SettingChange> {
        let key = key.parse::<SettingKey>()?;
        self.apply(&Command {
            key,
            val: val.to_string(),
        })
    }
}
