//! Fire-and-forget delivery of settings commands to the host.
//!
//! [`CommandDispatcher::send`] never blocks and never reports failure to its
//! caller. Failed sends are logged and dropped; there is no retry.

use crate::{Command, CoreResult, HostReply, HostRequest, SettingChange, SettingsError};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Outbound side of the settings bridge.
pub trait CommandDispatcher {
    /// Hand `command` to the host without waiting for it to be applied.
    ///
    /// Commands are handed over in call order. Failures are swallowed.
    fn send(&self, command: Command);
}

/// What eventually happened to a dispatched command.
///
/// Only produced by a dispatcher built with
/// [`ChannelDispatcher::with_outcomes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The host applied the command.
    Applied {
        /// The command as sent.
        command: Command,
        /// The change the host recorded.
        change: SettingChange,
    },
    /// The host refused the command.
    Rejected {
        /// The command as sent.
        command: Command,
        /// Reason given by the host.
        reason: String,
    },
    /// The host dropped the request without answering.
    Unanswered {
        /// The command as sent.
        command: Command,
    },
}

/// Dispatcher backed by an unbounded tokio channel to the host loop.
///
/// Unbounded so that `send` can never block the UI or fail because of
/// backpressure; the only failure left is a closed channel.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    host_tx: mpsc::UnboundedSender<HostRequest>,
    outcome_tx: Option<mpsc::UnboundedSender<DispatchOutcome>>,
}

impl ChannelDispatcher {
    /// Pure fire-and-forget: host replies are discarded.
    pub fn new(host_tx: mpsc::UnboundedSender<HostRequest>) -> Self {
        Self {
            host_tx,
            outcome_tx: None,
        }
    }

    /// Like [`ChannelDispatcher::new`], but forwards every host reply to
    /// `outcome_tx`.
    ///
    /// Replies are awaited on spawned tasks, never on the caller. Outside a
    /// tokio runtime replies are discarded.
    pub fn with_outcomes(
        host_tx: mpsc::UnboundedSender<HostRequest>,
        outcome_tx: mpsc::UnboundedSender<DispatchOutcome>,
    ) -> Self {
        Self {
            host_tx,
            outcome_tx: Some(outcome_tx),
        }
    }

    /// Hand `command` to the host, reporting a closed channel as
    /// [`SettingsError::DispatchFailure`].
    #[track_caller]
    pub fn try_send(&self, command: Command) -> CoreResult<()> {
        let (request, reply_rx) = HostRequest::new(command.clone());

        self.host_tx
            .send(request)
            .map_err(|_| SettingsError::DispatchFailure {
                reason: format!("host channel closed, dropped {}={}", command.key, command.val),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(key = %command.key, val = %command.val, "Command dispatched");

        if let Some(outcome_tx) = &self.outcome_tx {
            watch_reply(command, reply_rx, outcome_tx.clone());
        }

        Ok(())
    }
}

impl CommandDispatcher for ChannelDispatcher {
    fn send(&self, command: Command) {
        if let Err(e) = self.try_send(command) {
            warn!(error = %e, "Command dropped");
        }
    }
}

fn watch_reply(
    command: Command,
    reply_rx: oneshot::Receiver<HostReply>,
    outcome_tx: mpsc::UnboundedSender<DispatchOutcome>,
) {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        debug!(key = %command.key, "No runtime, host reply discarded");
        return;
    };

    handle.spawn(async move {
        let outcome = match reply_rx.await {
            Ok(Ok(change)) => DispatchOutcome::Applied { command, change },
            Ok(Err(rejection)) => DispatchOutcome::Rejected {
                command,
                reason: rejection.reason,
            },
            Err(_) => DispatchOutcome::Unanswered { command },
        };
        let _ = outcome_tx.send(outcome);
    });
}
