use crate::{CoreResult, SettingsError};

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Activation chord selector.
///
/// Each variant stands for `WIN+ALT+<letter>`. The wire encoding is the bare
/// letter (`"C"`, `"S"`, `"L"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Activation {
    /// `WIN+ALT+C`.
    #[default]
    C,
    /// `WIN+ALT+S`.
    S,
    /// `WIN+ALT+L`.
    L,
}

impl Activation {
    /// Every selectable chord, in the order the dropdown lists them.
    pub const ALL: [Activation; 3] = [Activation::C, Activation::S, Activation::L];

    /// Wire encoding of this choice.
    pub fn as_str(self) -> &'static str {
        match self {
            Activation::C => "C",
            Activation::S => "S",
            Activation::L => "L",
        }
    }

    /// Human-readable chord, as shown next to the dropdown option.
    pub fn chord_label(self) -> &'static str {
        match self {
            Activation::C => "WIN+ALT+C",
            Activation::S => "WIN+ALT+S",
            Activation::L => "WIN+ALT+L",
        }
    }

    /// The letter key that completes the chord.
    pub fn letter(self) -> char {
        match self {
            Activation::C => 'c',
            Activation::S => 's',
            Activation::L => 'l',
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activation {
    type Err = SettingsError;

    /// Parse the exact wire encoding. No trimming, no case folding.
    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "C" => Ok(Activation::C),
            "S" => Ok(Activation::S),
            "L" => Ok(Activation::L),
            other => Err(SettingsError::InvalidArgument {
                setting: "activation",
                value: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
