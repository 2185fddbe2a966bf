//! Loopback HTTP server for the settings page.
//!
//! `GET /` serves the page, `GET /ws` carries its events. The process has a
//! single [`SettingsPanel`] that every socket drives, so a page opened again
//! from the tray shows the settings the host is running with.

pub(crate) mod session;
pub(crate) mod ui_event;

use session::CLOSE_GRACE;

use crate::{AppCommand, AppError, AppResult};

use lang_switcher_core::{
    ChannelDispatcher, DispatchOutcome, HostRequest, PanelState, SettingsPanel,
};

use std::{
    net::{Ipv4Addr, SocketAddr},
    panic::Location,
    sync::{Arc, atomic::AtomicUsize},
    time::Duration,
};

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::{Html, Response},
    routing::get,
};
use error_location::ErrorLocation;
use tokio::{
    net::TcpListener,
    sync::{Mutex, mpsc, watch},
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const SETTINGS_PAGE: &str = include_str!("../../resources/settings.html");

/// Shared by every request handler.
#[derive(Clone)]
pub(crate) struct ServerState {
    pub(crate) panel: Arc<Mutex<SettingsPanel<ChannelDispatcher>>>,
    pub(crate) panel_state_tx: Arc<watch::Sender<PanelState>>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) open_sessions: Arc<AtomicUsize>,
    pub(crate) close_grace: Duration,
}

impl ServerState {
    /// Mount the panel with its defaults.
    pub(crate) fn new(
        dispatcher: ChannelDispatcher,
        command_tx: mpsc::Sender<AppCommand>,
        close_grace: Duration,
    ) -> Self {
        let panel = SettingsPanel::new(dispatcher);
        let (panel_state_tx, _) = watch::channel(panel.state());

        Self {
            panel: Arc::new(Mutex::new(panel)),
            panel_state_tx: Arc::new(panel_state_tx),
            command_tx,
            open_sessions: Arc::new(AtomicUsize::new(0)),
            close_grace,
        }
    }

    /// Follow the panel state, starting from its current value.
    pub(crate) fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.panel_state_tx.subscribe()
    }
}

/// Build the settings router.
pub(crate) fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

/// Settings page server bound to `127.0.0.1`.
pub struct SettingsServer {
    port: u16,
    open_on_start: bool,
    state: ServerState,
    outcome_rx: mpsc::UnboundedReceiver<DispatchOutcome>,
}

impl SettingsServer {
    /// Create a server that feeds panel commands into `host_tx`.
    pub fn new(
        port: u16,
        open_on_start: bool,
        host_tx: mpsc::UnboundedSender<HostRequest>,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let dispatcher = ChannelDispatcher::with_outcomes(host_tx, outcome_tx);

        Self {
            port,
            open_on_start,
            state: ServerState::new(dispatcher, command_tx, CLOSE_GRACE),
            outcome_rx,
        }
    }

    /// Serve until shutdown is signalled.
    #[instrument(skip(self, shutdown_rx), fields(port = self.port))]
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::ServerError {
                reason: format!("Failed to bind {}: {}", addr, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let url = format!("http://{}", addr);
        info!(url = %url, "Settings server listening");

        tokio::spawn(log_outcomes(self.outcome_rx));

        if self.open_on_start
            && let Err(e) = open::that(&url)
        {
            warn!(error = %e, "Failed to open settings page");
        }

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await?;

        info!("Settings server stopped");

        Ok(())
    }
}

async fn index() -> Html<&'static str> {
    Html(SETTINGS_PAGE)
}

async fn log_outcomes(mut outcome_rx: mpsc::UnboundedReceiver<DispatchOutcome>) {
    while let Some(outcome) = outcome_rx.recv().await {
        match outcome {
            DispatchOutcome::Applied { command, .. } => {
                debug!(key = %command.key, val = %command.val, "Host applied command");
            }
            DispatchOutcome::Rejected { command, reason } => {
                warn!(key = %command.key, val = %command.val, reason = %reason, "Host rejected command");
            }
            DispatchOutcome::Unanswered { command } => {
                warn!(key = %command.key, "Host dropped command without reply");
            }
        }
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ServerState>) -> Response {
    ws.on_upgrade(move |socket| session::run_session(socket, state, Uuid::new_v4()))
}
