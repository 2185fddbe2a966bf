use crate::config::{default_clipboard_settle_ms, default_open_settings_on_start};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Open the settings page in the browser once the server is up.
    #[serde(default = "default_open_settings_on_start")]
    pub open_settings_on_start: bool,

    /// How long to wait for the clipboard after a simulated copy or paste.
    #[serde(default = "default_clipboard_settle_ms")]
    pub clipboard_settle_ms: u64,
}

impl BehaviourConfig {
    /// Clipboard settle delay as a `Duration`.
    pub fn clipboard_settle(&self) -> Duration {
        Duration::from_millis(self.clipboard_settle_ms)
    }
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            open_settings_on_start: default_open_settings_on_start(),
            clipboard_settle_ms: default_clipboard_settle_ms(),
        }
    }
}
