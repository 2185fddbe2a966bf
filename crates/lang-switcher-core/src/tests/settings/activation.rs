use crate::{Activation, SettingsError};

use std::str::FromStr;

/// WHAT: Every wire letter parses to its chord
/// WHY: The host and the dropdown share the same three encodings
#[test]
#[allow(clippy::unwrap_used)]
fn given_each_wire_letter_when_parsing_then_matching_activation() {
    // Given/When/Then: Each letter parses and encodes back to itself
    for activation in Activation::ALL {
        let parsed = Activation::from_str(activation.as_str()).unwrap();
        assert_eq!(parsed, activation);
    }
}

/// WHAT: Values outside the enumeration are rejected
/// WHY: Invalid choices must never reach the host
#[test]
fn given_out_of_enum_values_when_parsing_then_invalid_argument() {
    // Given: Near misses and garbage
    for raw in ["c", "X", "", " C", "WIN+ALT+C", "CS"] {
        // When: Parsing
        let result = Activation::from_str(raw);

        // Then: InvalidArgument carrying the raw value
        match result {
            Err(SettingsError::InvalidArgument { setting, value, .. }) => {
                assert_eq!(setting, "activation");
                assert_eq!(value, raw);
            }
            other => unreachable!("expected InvalidArgument for {raw:?}, got {other:?}"),
        }
    }
}

/// WHAT: Default chord is WIN+ALT+C
/// WHY: Fresh panels and the host must agree on the starting chord
#[test]
fn given_no_selection_when_defaulting_then_c() {
    // Given/When: Default activation
    let activation = Activation::default();

    // Then: C with its label
    assert_eq!(activation, Activation::C);
    assert_eq!(activation.chord_label(), "WIN+ALT+C");
}

/// WHAT: Dropdown order and labels are fixed
/// WHY: The settings page renders options straight from this list
#[test]
fn given_all_choices_when_listing_then_c_s_l_in_order() {
    // Given/When: The option list
    let labels: Vec<_> = Activation::ALL.iter().map(|a| a.chord_label()).collect();

    // Then: C, S, L
    assert_eq!(labels, ["WIN+ALT+C", "WIN+ALT+S", "WIN+ALT+L"]);
}
