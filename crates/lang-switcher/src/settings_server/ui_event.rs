use lang_switcher_core::{CommandDispatcher, PanelState, SettingsPanel};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A user interaction reported by the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// Dropdown changed.
    SelectActivation {
        /// Wire letter of the chosen chord.
        choice: String,
    },
    /// Checkbox clicked.
    ToggleCloseToTray,
}

/// Frame sent back to the page after every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PanelMessage {
    /// The panel state the controls should show.
    State(PanelState),
    /// The event was rejected; the controls keep their current state.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

/// Apply one raw frame from the page to `panel`.
pub fn apply_ui_event<D: CommandDispatcher>(
    panel: &mut SettingsPanel<D>,
    frame: &str,
) -> PanelMessage {
    let event = match serde_json::from_str::<UiEvent>(frame) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Malformed settings event");
            return PanelMessage::Error {
                error: format!("malformed event: {}", e),
            };
        }
    };

    match event {
        UiEvent::SelectActivation { choice } => {
            if let Err(e) = panel.select_activation(&choice) {
                warn!(error = %e, "Rejected activation choice");
                return PanelMessage::Error {
                    error: e.to_string(),
                };
            }
        }
        UiEvent::ToggleCloseToTray => {
            panel.toggle_close_to_tray();
        }
    }

    PanelMessage::State(panel.state())
}
