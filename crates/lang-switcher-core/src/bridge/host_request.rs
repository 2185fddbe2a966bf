use crate::{Command, SettingChange};

use tokio::sync::oneshot;

/// Host verdict for one command.
pub type HostReply = Result<SettingChange, HostRejection>;

/// Why the host refused a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRejection {
    /// Human-readable reason, suitable for logs.
    pub reason: String,
}

/// A command in flight from a settings panel to the host.
///
/// The reply sender is always present so the host can answer, but the
/// sending side is free to have dropped the receiver. Hosts must treat a
/// failed reply as normal.
#[derive(Debug)]
pub struct HostRequest {
    /// The command to apply.
    pub command: Command,
    /// Where the host reports the outcome.
    pub reply: oneshot::Sender<HostReply>,
}

impl HostRequest {
    /// Build a request together with the receiver for its reply.
    pub fn new(command: Command) -> (Self, oneshot::Receiver<HostReply>) {
        let (reply, reply_rx) = oneshot::channel();
        (Self { command, reply }, reply_rx)
    }
}
