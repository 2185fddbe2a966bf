use crate::{Activation, Command, CommandDispatcher, CoreResult, PanelState};

use std::str::FromStr;

use tracing::{debug, instrument};

/// In-memory state behind one settings view.
///
/// Owns the two settings exclusively. Every mutation updates local state
/// first and then hands exactly one [`Command`] to the dispatcher; the
/// dispatch outcome is never observed here, so the state a view renders is
/// always the state the user picked.
#[derive(Debug)]
pub struct SettingsPanel<D> {
    state: PanelState,
    dispatcher: D,
}

impl<D: CommandDispatcher> SettingsPanel<D> {
    /// Mount a panel with default settings. Nothing is dispatched.
    pub fn new(dispatcher: D) -> Self {
        Self {
            state: PanelState::default(),
            dispatcher,
        }
    }

    /// Current settings snapshot.
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// The dispatcher commands are handed to.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Select an activation chord from its wire encoding (`"C"`, `"S"`, `"L"`).
    ///
    /// Re-selecting the current chord still dispatches.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for anything outside the enumeration. State
    /// is left untouched and nothing is dispatched.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn select_activation(&mut self, choice: &str) -> CoreResult<Activation> {
        let activation = Activation::from_str(choice)?;

        self.state.activation = activation;
        self.dispatcher.send(Command::activation(activation));

        debug!(activation = %activation, "Activation selected");

        Ok(activation)
    }

    /// Flip close-to-tray and dispatch the new value. Returns the new value.
    #[instrument(skip(self))]
    pub fn toggle_close_to_tray(&mut self) -> bool {
        let enabled = !self.state.close_to_tray;

        self.state.close_to_tray = enabled;
        self.dispatcher.send(Command::close_to_tray(enabled));

        debug!(close_to_tray = enabled, "Close-to-tray toggled");

        enabled
    }
}
