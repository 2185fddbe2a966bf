use lang_switcher_core::Activation;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` and `GlobalHotKeyManager` (both are
/// `!Send` or need the main thread's message pump), so hotkey rebinding and
/// process lifecycle events flow through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Unregister the current chord and register this one instead.
    RebindHotkey(Activation),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
