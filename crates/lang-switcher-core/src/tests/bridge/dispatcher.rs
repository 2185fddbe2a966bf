use crate::{
    Activation, ChannelDispatcher, Command, CommandDispatcher, DispatchOutcome, HostRejection,
    SettingChange, SettingsError, SettingsPanel,
};

use tokio::sync::mpsc;

/// WHAT: Commands arrive at the host in send order
/// WHY: Send order must match interaction order
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_open_channel_when_panel_interacts_then_host_receives_in_order() {
    // Given: A panel wired to a host channel
    let (host_tx, mut host_rx) = mpsc::unbounded_channel();
    let mut panel = SettingsPanel::new(ChannelDispatcher::new(host_tx));

    // When: Toggle, then select L
    panel.toggle_close_to_tray();
    panel.select_activation("L").unwrap();

    // Then: Host sees both, in order
    let first = host_rx.recv().await.unwrap();
    let second = host_rx.recv().await.unwrap();
    assert_eq!(first.command, Command::close_to_tray(false));
    assert_eq!(second.command, Command::activation(Activation::L));
    assert!(host_rx.try_recv().is_err());
}

/// WHAT: A closed host channel does not affect local state
/// WHY: State is optimistic; dispatch failures are dropped
#[test]
#[allow(clippy::unwrap_used)]
fn given_closed_channel_when_interacting_then_state_still_updates() {
    // Given: A panel whose host is gone
    let (host_tx, host_rx) = mpsc::unbounded_channel();
    drop(host_rx);
    let mut panel = SettingsPanel::new(ChannelDispatcher::new(host_tx));

    // When: Interacting
    panel.select_activation("S").unwrap();
    let enabled = panel.toggle_close_to_tray();

    // Then: Local state reflects both interactions
    assert_eq!(panel.state().activation, Activation::S);
    assert!(!enabled);
}

/// WHAT: try_send reports a closed channel as DispatchFailure
/// WHY: The failure kind must be observable for logging
#[test]
fn given_closed_channel_when_try_sending_then_dispatch_failure() {
    // Given: A dispatcher whose host is gone
    let (host_tx, host_rx) = mpsc::unbounded_channel();
    drop(host_rx);
    let dispatcher = ChannelDispatcher::new(host_tx);

    // When: Sending
    let result = dispatcher.try_send(Command::activation(Activation::C));

    // Then: DispatchFailure
    assert!(matches!(
        result,
        Err(SettingsError::DispatchFailure { .. })
    ));
}

/// WHAT: send returns without waiting for the host
/// WHY: The UI must never block on dispatch
#[test]
fn given_host_never_reads_when_sending_many_then_all_return() {
    // Given: A host that never drains its channel
    let (host_tx, host_rx) = mpsc::unbounded_channel();
    let dispatcher = ChannelDispatcher::new(host_tx);

    // When: Sending lots of commands outside any runtime
    for i in 0..1_000 {
        dispatcher.send(Command::close_to_tray(i % 2 == 0));
    }

    // Then: Everything queued, nothing blocked
    assert_eq!(host_rx.len(), 1_000);
}

/// WHAT: Host replies are forwarded as outcomes when requested
/// WHY: The optional result channel exposes rejections without blocking
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_outcome_channel_when_host_replies_then_outcomes_forwarded() {
    // Given: A dispatcher with an outcome channel
    let (host_tx, mut host_rx) = mpsc::unbounded_channel();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let dispatcher = ChannelDispatcher::with_outcomes(host_tx, outcome_tx);

    // When: Host applies one, rejects one, ignores one
    dispatcher.send(Command::activation(Activation::S));
    dispatcher.send(Command::close_to_tray(false));
    dispatcher.send(Command::close_to_tray(true));

    let applied = host_rx.recv().await.unwrap();
    let _ = applied
        .reply
        .send(Ok(SettingChange::Activation(Activation::S)));
    let rejected = host_rx.recv().await.unwrap();
    let _ = rejected.reply.send(Err(HostRejection {
        reason: "nope".to_string(),
    }));
    let ignored = host_rx.recv().await.unwrap();
    drop(ignored);

    // Then: Three outcomes, each matching its reply
    let mut outcomes = Vec::new();
    for _ in 0..3 {
        outcomes.push(outcome_rx.recv().await.unwrap());
    }
    assert!(outcomes.contains(&DispatchOutcome::Applied {
        command: Command::activation(Activation::S),
        change: SettingChange::Activation(Activation::S),
    }));
    assert!(outcomes.contains(&DispatchOutcome::Rejected {
        command: Command::close_to_tray(false),
        reason: "nope".to_string(),
    }));
    assert!(outcomes.contains(&DispatchOutcome::Unanswered {
        command: Command::close_to_tray(true),
    }));
}
