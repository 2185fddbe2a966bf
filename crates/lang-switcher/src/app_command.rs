use lang_switcher_core::Activation;

/// Commands sent to the main application loop from the hotkey handler and
/// the settings server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// The bound chord fired: convert the current selection.
    ConvertSelection(Activation),
    /// The last open settings page went away.
    SettingsClosed,
    /// Request application shutdown.
    Shutdown,
}
