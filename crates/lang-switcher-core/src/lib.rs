//! LangSwitcher Core Library
//!
//! The settings bridge between a settings view and the native host, plus the
//! keyboard layout converter the host runs on the activation chord.
//!
//! # Example
//!
//! ```
//! use lang_switcher_core::{ChannelDispatcher, HostSettings, SettingsPanel, CoreResult};
//!
//! use tokio::sync::mpsc;
//!
//! fn main() -> CoreResult<()> {
//!     let (host_tx, mut host_rx) = mpsc::unbounded_channel();
//!     let mut panel = SettingsPanel::new(ChannelDispatcher::new(host_tx));
//!
//!     panel.select_activation("S")?;
//!     panel.toggle_close_to_tray();
//!
//!     let mut host = HostSettings::default();
//!     while let Ok(request) = host_rx.try_recv() {
//!         host.apply(&request.command)?;
//!     }
//!
//!     assert_eq!(host.activation().as_str(), "S");
//!     assert!(!host.close_to_tray());
//!     Ok(())
//! }
//! ```

mod bridge;
mod error;
pub mod layout;
mod settings;

pub use {
    bridge::{
        ChannelDispatcher, Command, CommandDispatcher, DispatchOutcome, HostRejection, HostReply,
        HostRequest, HostSettings, SET_VAR, SettingChange, decode_bool, encode_bool,
    },
    error::{Result as CoreResult, SettingsError},
    settings::{Activation, PanelState, SettingKey, SettingsPanel},
};

#[cfg(test)]
mod tests;
