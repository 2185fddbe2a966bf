use crate::{
    Activation, ChannelDispatcher, Command, HostSettings, SettingChange, SettingKey,
    SettingsError, SettingsPanel,
};

use tokio::sync::mpsc;

/// WHAT: Host store starts at the panel defaults
/// WHY: Host and a freshly loaded panel must agree before any command
#[test]
fn given_new_store_when_reading_then_c_and_close_to_tray() {
    // Given/When: A default store
    let settings = HostSettings::default();

    // Then: C and true
    assert_eq!(settings.activation(), Activation::C);
    assert!(settings.close_to_tray());
}

/// WHAT: Raw wire commands are applied
/// WHY: The host receives plain key/value strings
#[test]
#[allow(clippy::unwrap_used)]
fn given_valid_raw_commands_when_applying_then_store_updated() {
    // Given: A default store
    let mut settings = HostSettings::default();

    // When: Applying activation=L and closetotray=false
    let a = settings.apply_raw("activation", "L").unwrap();
    let t = settings.apply_raw("closetotray", "false").unwrap();

    // Then: Changes reported and stored
    assert_eq!(a, SettingChange::Activation(Activation::L));
    assert_eq!(t, SettingChange::CloseToTray(false));
    assert_eq!(settings.activation(), Activation::L);
    assert!(!settings.close_to_tray());
}

/// WHAT: Invalid commands leave the store untouched
/// WHY: A rejected command must not half-apply
#[test]
fn given_invalid_commands_when_applying_then_rejected_and_unchanged() {
    // Given: A default store
    let mut settings = HostSettings::default();

    // When: Applying bad key, bad bool, bad chord
    let bad_key = settings.apply_raw("closeToTray", "false");
    let bad_bool = settings.apply_raw("closetotray", "0");
    let bad_chord = settings.apply(&Command {
        key: SettingKey::Activation,
        val: "X".to_string(),
    });

    // Then: Each rejected with its kind, store unchanged
    assert!(matches!(bad_key, Err(SettingsError::UnknownKey { .. })));
    assert!(matches!(
        bad_bool,
        Err(SettingsError::InvalidValue { key: "closetotray", .. })
    ));
    assert!(matches!(
        bad_chord,
        Err(SettingsError::InvalidValue { key: "activation", .. })
    ));
    assert_eq!(settings, HostSettings::default());
}

/// WHAT: Panel and host converge after a stream of interactions
/// WHY: Last write wins when commands are applied in send order
#[test]
#[allow(clippy::unwrap_used)]
fn given_panel_interactions_when_host_drains_then_states_match() {
    // Given: Panel wired to a host store
    let (host_tx, mut host_rx) = mpsc::unbounded_channel();
    let mut panel = SettingsPanel::new(ChannelDispatcher::new(host_tx));
    let mut settings = HostSettings::default();

    // When: Rapid interactions, then host drains
    panel.select_activation("S").unwrap();
    for _ in 0..5 {
        panel.toggle_close_to_tray();
    }
    panel.select_activation("L").unwrap();

    while let Ok(request) = host_rx.try_recv() {
        settings.apply(&request.command).unwrap();
    }

    // Then: Host mirrors the panel
    assert_eq!(settings.activation(), panel.state().activation);
    assert_eq!(settings.close_to_tray(), panel.state().close_to_tray);
}
