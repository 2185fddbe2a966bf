use crate::{CoreResult, SettingsError};

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Closed set of keys the host accepts through `set_var`.
///
/// The wire names are fixed by the host contract. `closetotray` is flattened
/// relative to the `closeToTray` field name and must stay that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    /// `"activation"`.
    #[serde(rename = "activation")]
    Activation,
    /// `"closetotray"`.
    #[serde(rename = "closetotray")]
    CloseToTray,
}

impl SettingKey {
    /// Wire name of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Activation => "activation",
            SettingKey::CloseToTray => "closetotray",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "activation" => Ok(SettingKey::Activation),
            "closetotray" => Ok(SettingKey::CloseToTray),
            other => Err(SettingsError::UnknownKey {
                key: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
