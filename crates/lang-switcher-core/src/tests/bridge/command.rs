use crate::{Activation, Command, SET_VAR, SettingKey, SettingsError, decode_bool, encode_bool};

/// WHAT: Booleans encode to the literal strings only
/// WHY: The host parses "true"/"false" and nothing else
#[test]
fn given_booleans_when_encoding_then_true_false_literals() {
    // Given/When/Then: Both values map to their literals
    assert_eq!(encode_bool(true), "true");
    assert_eq!(encode_bool(false), "false");
}

/// WHAT: close_to_tray commands carry the flattened key and string value
/// WHY: The host contract uses "closetotray", not "closeToTray"
#[test]
fn given_tray_flag_when_building_command_then_closetotray_key_and_string_val() {
    for (enabled, val) in [(true, "true"), (false, "false")] {
        // Given/When: A command for the flag
        let command = Command::close_to_tray(enabled);

        // Then: Flattened key, literal value, set_var name
        assert_eq!(command.key.as_str(), "closetotray");
        assert_eq!(command.val, val);
        assert_eq!(command.name(), SET_VAR);
    }
}

/// WHAT: Commands serialize to the host payload shape
/// WHY: The host reads `{key, val}` with string values only
#[test]
#[allow(clippy::unwrap_used)]
fn given_commands_when_serializing_then_key_val_strings() {
    // Given: One command of each kind
    let activation = Command::activation(Activation::L);
    let tray = Command::close_to_tray(false);

    // When: Serializing
    let activation = serde_json::to_value(&activation).unwrap();
    let tray = serde_json::to_value(&tray).unwrap();

    // Then: Both values are JSON strings, never booleans
    assert_eq!(
        activation,
        serde_json::json!({ "key": "activation", "val": "L" })
    );
    assert_eq!(
        tray,
        serde_json::json!({ "key": "closetotray", "val": "false" })
    );
}

/// WHAT: Only the exact literals decode
/// WHY: "1"/"0" and case variants are not part of the wire contract
#[test]
fn given_non_literal_booleans_when_decoding_then_invalid_value() {
    // Given: Encodings the UI never sends
    for raw in ["1", "0", "TRUE", "False", " true", "yes", ""] {
        // When: Decoding
        let result = decode_bool(SettingKey::CloseToTray, raw);

        // Then: InvalidValue
        assert!(
            matches!(result, Err(SettingsError::InvalidValue { key: "closetotray", .. })),
            "{raw:?} should be rejected"
        );
    }
}

/// WHAT: Unknown wire keys are rejected
/// WHY: The key set is closed; "closeToTray" is not an alias
#[test]
fn given_unknown_keys_when_parsing_then_unknown_key() {
    // Given: Keys outside the closed set
    for raw in ["closeToTray", "Activation", "hotkey", ""] {
        // When: Parsing
        let result = raw.parse::<SettingKey>();

        // Then: UnknownKey
        assert!(matches!(result, Err(SettingsError::UnknownKey { .. })));
    }
}
