use crate::{
    AppCommand,
    settings_server::{
        ServerState,
        ui_event::{PanelMessage, apply_ui_event},
    },
};

use std::{sync::atomic::Ordering, time::Duration};

use axum::extract::ws::{Message, WebSocket};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// How long the last page may be gone before it counts as closed.
///
/// A reload drops the socket and opens a new one almost immediately; that
/// must not look like the window being closed.
pub(crate) const CLOSE_GRACE: Duration = Duration::from_millis(1500);

/// Drive one settings page over its WebSocket.
///
/// The page is sent the shared panel's state on connect and again after
/// every change made from any page. Rejected events are answered only to
/// the page that sent them.
#[instrument(skip(socket, state))]
pub(crate) async fn run_session(mut socket: WebSocket, state: ServerState, session_id: Uuid) {
    open_session(&state);
    info!(session_id = %session_id, "Settings page connected");

    let mut panel_state_rx = state.subscribe();
    let initial = *panel_state_rx.borrow_and_update();

    if send_message(&mut socket, &PanelMessage::State(initial))
        .await
        .is_ok()
    {
        loop {
            tokio::select! {
                frame = socket.recv() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(error) = handle_frame(&state, text.as_str()).await
                            && send_message(&mut socket, &error).await.is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(session_id = %session_id, error = %e, "Settings socket error");
                        break;
                    }
                },
                changed = panel_state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = *panel_state_rx.borrow_and_update();
                    if send_message(&mut socket, &PanelMessage::State(current)).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    info!(session_id = %session_id, "Settings page disconnected");
    close_session(&state);
}

/// Apply one page frame to the shared panel.
///
/// An accepted event publishes the new state to every open page and returns
/// `None`; a rejected one returns the error frame for the sender.
pub(crate) async fn handle_frame(state: &ServerState, frame: &str) -> Option<PanelMessage> {
    let mut panel = state.panel.lock().await;

    match apply_ui_event(&mut *panel, frame) {
        PanelMessage::State(current) => {
            state.panel_state_tx.send_replace(current);
            None
        }
        error => Some(error),
    }
}

/// Count a settings page as open.
pub(crate) fn open_session(state: &ServerState) {
    state.open_sessions.fetch_add(1, Ordering::SeqCst);
}

/// Count a settings page as gone; the last one out starts the close timer.
pub(crate) fn close_session(state: &ServerState) {
    if state.open_sessions.fetch_sub(1, Ordering::SeqCst) == 1 {
        tokio::spawn(report_if_still_closed(state.clone()));
    }
}

async fn report_if_still_closed(state: ServerState) {
    tokio::time::sleep(state.close_grace).await;

    if state.open_sessions.load(Ordering::SeqCst) != 0 {
        debug!("Settings page reopened within grace period");
        return;
    }

    if let Err(e) = state.command_tx.send(AppCommand::SettingsClosed).await {
        warn!(error = %e, "Failed to report settings close");
    }
}

async fn send_message(socket: &mut WebSocket, message: &PanelMessage) -> Result<(), ()> {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to encode panel message");
            return Err(());
        }
    };

    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| debug!(error = %e, "Settings socket closed while sending"))
}
