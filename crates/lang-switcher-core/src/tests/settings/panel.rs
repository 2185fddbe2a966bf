use crate::{Activation, Command, PanelState, SettingKey, SettingsError, SettingsPanel};

use crate::tests::RecordingDispatcher;

fn panel() -> SettingsPanel<RecordingDispatcher> {
    SettingsPanel::new(RecordingDispatcher::default())
}

fn command(key: SettingKey, val: &str) -> Command {
    Command {
        key,
        val: val.to_string(),
    }
}

/// WHAT: A fresh panel shows the defaults and has sent nothing
/// WHY: Mounting the view must not talk to the host
#[test]
fn given_fresh_panel_when_mounted_then_defaults_and_no_commands() {
    // Given/When: A newly mounted panel
    let panel = panel();

    // Then: C + close-to-tray, no commands
    assert_eq!(
        panel.state(),
        PanelState {
            activation: Activation::C,
            close_to_tray: true,
        }
    );
    assert!(panel.dispatcher().sent().is_empty());
}

/// WHAT: Each choice updates state and sends exactly one activation command
/// WHY: One interaction maps to exactly one host command
#[test]
#[allow(clippy::unwrap_used)]
fn given_each_choice_when_selecting_then_state_and_single_command() {
    for choice in ["C", "S", "L"] {
        // Given: A fresh panel
        let mut panel = panel();

        // When: Selecting the choice
        panel.select_activation(choice).unwrap();

        // Then: State shows it, one command carries it
        assert_eq!(panel.state().activation.as_str(), choice);
        assert_eq!(
            panel.dispatcher().sent(),
            vec![command(SettingKey::Activation, choice)]
        );
    }
}

/// WHAT: Selecting S from fresh load
/// WHY: Close-to-tray must be left alone by an activation change
#[test]
#[allow(clippy::unwrap_used)]
fn given_fresh_panel_when_selecting_s_then_only_activation_changes() {
    // Given: A fresh panel
    let mut panel = panel();

    // When: Selecting S
    panel.select_activation("S").unwrap();

    // Then: {S, true} and one command
    assert_eq!(
        panel.state(),
        PanelState {
            activation: Activation::S,
            close_to_tray: true,
        }
    );
    assert_eq!(
        panel.dispatcher().sent(),
        vec![command(SettingKey::Activation, "S")]
    );
}

/// WHAT: Toggle parity decides the final value, one command per toggle
/// WHY: No batching or coalescing of rapid toggles
#[test]
fn given_n_toggles_when_toggling_then_parity_and_one_command_each() {
    for toggles in 1..=6 {
        // Given: A fresh panel
        let mut panel = panel();

        // When: Toggling n times
        for _ in 0..toggles {
            panel.toggle_close_to_tray();
        }

        // Then: Odd → false, even → true; values alternate starting at "false"
        assert_eq!(panel.state().close_to_tray, toggles % 2 == 0);

        let vals: Vec<_> = panel
            .dispatcher()
            .sent()
            .into_iter()
            .map(|c| {
                assert_eq!(c.key, SettingKey::CloseToTray);
                c.val
            })
            .collect();
        let expected: Vec<_> = (0..toggles)
            .map(|i| if i % 2 == 0 { "false" } else { "true" }.to_string())
            .collect();
        assert_eq!(vals, expected);
    }
}

/// WHAT: Toggle returns the new value
/// WHY: Callers render the control from the return value
#[test]
fn given_default_tray_flag_when_toggling_then_returns_new_value() {
    // Given: A fresh panel
    let mut panel = panel();

    // When/Then: First toggle disables, second re-enables
    assert!(!panel.toggle_close_to_tray());
    assert!(panel.toggle_close_to_tray());
}

/// WHAT: Commands follow interaction order
/// WHY: The host applies last-write-wins in send order
#[test]
#[allow(clippy::unwrap_used)]
fn given_toggle_then_select_l_when_interacting_then_commands_in_order() {
    // Given: A fresh panel
    let mut panel = panel();

    // When: Toggle tray once, then select L
    panel.toggle_close_to_tray();
    panel.select_activation("L").unwrap();

    // Then: closetotray=false, then activation=L; final {L, false}
    assert_eq!(
        panel.dispatcher().sent(),
        vec![
            command(SettingKey::CloseToTray, "false"),
            command(SettingKey::Activation, "L"),
        ]
    );
    assert_eq!(
        panel.state(),
        PanelState {
            activation: Activation::L,
            close_to_tray: false,
        }
    );
}

/// WHAT: Mixed interaction sequence keeps a 1:1 mapping
/// WHY: Every interaction dispatches exactly once, in order
#[test]
#[allow(clippy::unwrap_used)]
fn given_mixed_interactions_when_interacting_then_one_command_each_in_order() {
    // Given: A fresh panel
    let mut panel = panel();

    // When: S, toggle, S again, toggle, C
    panel.select_activation("S").unwrap();
    panel.toggle_close_to_tray();
    panel.select_activation("S").unwrap();
    panel.toggle_close_to_tray();
    panel.select_activation("C").unwrap();

    // Then: Five commands mirroring the interactions
    assert_eq!(
        panel.dispatcher().sent(),
        vec![
            command(SettingKey::Activation, "S"),
            command(SettingKey::CloseToTray, "false"),
            command(SettingKey::Activation, "S"),
            command(SettingKey::CloseToTray, "true"),
            command(SettingKey::Activation, "C"),
        ]
    );
}

/// WHAT: Invalid choice changes nothing and sends nothing
/// WHY: Out-of-enum input is rejected at the boundary
#[test]
#[allow(clippy::unwrap_used)]
fn given_selected_s_when_selecting_invalid_then_rejected_without_side_effects() {
    // Given: A panel with S selected
    let mut panel = panel();
    panel.select_activation("S").unwrap();

    // When: Selecting an unknown chord
    let result = panel.select_activation("Q");

    // Then: InvalidArgument, state still S, still one command
    assert!(matches!(
        result,
        Err(SettingsError::InvalidArgument { .. })
    ));
    assert_eq!(panel.state().activation, Activation::S);
    assert_eq!(panel.dispatcher().sent().len(), 1);
}

/// WHAT: Panel state serializes with the UI field names
/// WHY: The settings page binds to `activation` and `closeToTray`
#[test]
#[allow(clippy::unwrap_used)]
fn given_default_state_when_serializing_then_camel_case_fields() {
    // Given: Default state
    let state = PanelState::default();

    // When: Serializing to JSON
    let json = serde_json::to_value(state).unwrap();

    // Then: UI field names and wire letter
    assert_eq!(
        json,
        serde_json::json!({ "activation": "C", "closeToTray": true })
    );
}
