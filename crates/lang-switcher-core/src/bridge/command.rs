use crate::{Activation, CoreResult, SettingKey, SettingsError};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Name of the host command every settings update travels under.
pub const SET_VAR: &str = "set_var";

/// A single outbound `set_var` instruction.
///
/// Serializes to the host payload `{"key": "...", "val": "..."}`. `val` is
/// always a string; booleans go through [`encode_bool`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Which setting this command updates.
    pub key: SettingKey,
    /// Wire-encoded value.
    pub val: String,
}

impl Command {
    /// `{key: "activation", val: "C" | "S" | "L"}`.
    pub fn activation(choice: Activation) -> Self {
        Self {
            key: SettingKey::Activation,
            val: choice.as_str().to_string(),
        }
    }

    /// `{key: "closetotray", val: "true" | "false"}`.
    pub fn close_to_tray(enabled: bool) -> Self {
        Self {
            key: SettingKey::CloseToTray,
            val: encode_bool(enabled).to_string(),
        }
    }

    /// Host command name this payload is sent under.
    pub fn name(&self) -> &'static str {
        SET_VAR
    }
}

/// Encode a boolean setting for the wire.
///
/// Only the literals `"true"` and `"false"` are ever produced.
pub fn encode_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Decode a boolean setting received from the wire.
///
/// Accepts exactly `"true"` and `"false"`; `"1"`, `"TRUE"`, `" true"` and
/// friends are rejected.
#[track_caller]
pub fn decode_bool(key: SettingKey, val: &str) -> CoreResult<bool> {
    match val {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(SettingsError::InvalidValue {
            key: key.as_str(),
            value: other.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
