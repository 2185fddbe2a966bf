use crate::Activation;

use serde::{Deserialize, Serialize};

/// Snapshot of the two settings a panel holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    /// Selected activation chord.
    pub activation: Activation,
    /// Whether closing the window hides it to the tray.
    pub close_to_tray: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            activation: Activation::default(),
            close_to_tray: true,
        }
    }
}
