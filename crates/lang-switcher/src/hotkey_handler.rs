//! Global activation chord handling.
//!
//! Registers `WIN+ALT+<letter>` for the selected [`Activation`] and forwards
//! presses of the currently bound chord to the main application. The bound
//! chord only changes once the new one is actually registered.

use crate::{AppCommand, AppError, AppResult};

use lang_switcher_core::Activation;

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// The `WIN+ALT+<letter>` hotkey for a chord selection.
pub fn chord_hotkey(activation: Activation) -> HotKey {
    let code = match activation {
        Activation::C => Code::KeyC,
        Activation::S => Code::KeyS,
        Activation::L => Code::KeyL,
    };

    HotKey::new(Some(Modifiers::SUPER | Modifiers::ALT), code)
}

/// Whether a hotkey event belongs to the chord that is active now.
///
/// Only presses count; releases of the same chord are ignored, and so are
/// late events from a chord that was just replaced.
pub fn is_active_chord(event_id: u32, state: HotKeyState, activation: Activation) -> bool {
    state == HotKeyState::Pressed && event_id == chord_hotkey(activation).id()
}

/// Registration surface of a hotkey manager.
pub trait HotkeyRegistry {
    /// Register `hotkey` with the OS.
    fn register(&self, hotkey: HotKey) -> Result<(), global_hotkey::Error>;
    /// Unregister `hotkey` from the OS.
    fn unregister(&self, hotkey: HotKey) -> Result<(), global_hotkey::Error>;
}

impl HotkeyRegistry for GlobalHotKeyManager {
    fn register(&self, hotkey: HotKey) -> Result<(), global_hotkey::Error> {
        GlobalHotKeyManager::register(self, hotkey)
    }

    fn unregister(&self, hotkey: HotKey) -> Result<(), global_hotkey::Error> {
        GlobalHotKeyManager::unregister(self, hotkey)
    }
}

/// The chord that is registered right now, published to the listener.
///
/// Lives on the main thread next to the hotkey manager.
pub struct ChordBinding {
    bound: Activation,
    activation_tx: watch::Sender<Activation>,
}

impl ChordBinding {
    /// Track a chord that is already registered.
    pub fn new(bound: Activation) -> (Self, watch::Receiver<Activation>) {
        let (activation_tx, activation_rx) = watch::channel(bound);
        (
            Self {
                bound,
                activation_tx,
            },
            activation_rx,
        )
    }

    /// The chord presses are matched against.
    pub fn bound(&self) -> Activation {
        self.bound
    }

    /// Move the registration to `to`, publishing it only on success.
    ///
    /// On failure the previous chord stays registered and published.
    #[instrument(skip(self, registry))]
    pub fn rebind<R: HotkeyRegistry>(&mut self, registry: &R, to: Activation) -> AppResult<()> {
        HotkeyHandler::rebind(registry, self.bound, to)?;

        self.bound = to;
        self.activation_tx.send_replace(to);

        Ok(())
    }
}

/// Global hotkey listener for the activation chord.
pub struct HotkeyHandler {
    activation_rx: watch::Receiver<Activation>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Create the hotkey manager and register the chord for `activation`.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey(activation: Activation) -> AppResult<GlobalHotKeyManager> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        manager
            .register(chord_hotkey(activation))
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", activation.chord_label(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = activation.chord_label(), "Global hotkey registered");

        Ok(manager)
    }

    /// Swap the registered chord from `from` to `to`.
    ///
    /// If the new chord cannot be registered the old one is put back.
    #[track_caller]
    #[instrument(skip(registry))]
    pub fn rebind<R: HotkeyRegistry>(
        registry: &R,
        from: Activation,
        to: Activation,
    ) -> AppResult<()> {
        if from == to {
            return Ok(());
        }

        registry
            .unregister(chord_hotkey(from))
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to unregister {}: {}", from.chord_label(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Err(e) = registry.register(chord_hotkey(to)) {
            if let Err(restore) = registry.register(chord_hotkey(from)) {
                warn!(error = %restore, hotkey = from.chord_label(), "Failed to restore previous hotkey");
            }
            return Err(AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", to.chord_label(), e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(
            from = from.chord_label(),
            to = to.chord_label(),
            "Global hotkey rebound"
        );

        Ok(())
    }

    /// Create a handler that follows the bound chord through `activation_rx`.
    ///
    /// This struct is `Send` and can live on any thread; it only listens on
    /// the global [`GlobalHotKeyEvent`] channel.
    pub fn new(
        activation_rx: watch::Receiver<Activation>,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> Self {
        Self {
            activation_rx,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop until shutdown is signalled.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // GlobalHotKeyEvent::receiver() is a blocking crossbeam receiver, so
        // forward from a single blocking task. The task ends on the first
        // blocking_send after event_rx is dropped.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    let activation = *self.activation_rx.borrow();
                    if is_active_chord(event.id, event.state, activation) {
                        self.handle_chord_press(activation).await?;
                    }
                }
            }
        }

        drop(event_rx);

        // The blocking task may be parked in recv() until the next hotkey
        // event; the runtime cleans it up on exit.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn handle_chord_press(&self, activation: Activation) -> AppResult<()> {
        self.command_tx
            .send(AppCommand::ConvertSelection(activation))
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send ConvertSelection: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(hotkey = activation.chord_label(), "Activation chord pressed");

        Ok(())
    }
}
