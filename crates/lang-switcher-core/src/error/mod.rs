use error_location::ErrorLocation;
use thiserror::Error;

/// Settings bridge errors with source location tracking.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A mutation entry point received a value outside its declared domain.
    #[error("Invalid argument for {setting}: {value:?} {location}")]
    InvalidArgument {
        /// Name of the setting the value was meant for.
        setting: &'static str,
        /// The rejected value, verbatim.
        value: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host received a command for a key it does not know.
    #[error("Unknown setting key: {key:?} {location}")]
    UnknownKey {
        /// The rejected key, verbatim.
        key: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host received a known key with a value it cannot decode.
    #[error("Invalid value for {key}: {value:?} {location}")]
    InvalidValue {
        /// Wire name of the key.
        key: &'static str,
        /// The rejected value, verbatim.
        value: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The command channel to the host is gone.
    #[error("Dispatch failed: {reason} {location}")]
    DispatchFailure {
        /// Description of the channel failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`SettingsError`].
pub type Result<T> = std::result::Result<T, SettingsError>;
