//! WebSocket sessions for the synchronization hub.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use crate::protocol::{ClientEvent, ServerEvent};
use crate::state::AppState;

/// WebSocket upgrade handler for `/ws`.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// One observer session: seed it with current state, then forward every
/// broadcast until either side goes away.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe();

    // Current state goes to this session alone, before any broadcast.
    let (snapshot, alert_mode) = state.connect_state();
    for event in [
        ServerEvent::InitData(snapshot),
        ServerEvent::UpdateAlertMode(alert_mode),
    ] {
        if send_event(&mut sender, &event).await.is_err() {
            return;
        }
    }

    let receiver_count = state.subscribe_count();
    info!(receiver_count, "session connected");

    // Forward broadcasts to this session. A lagged receiver just waits for
    // the next frame: every frame carries full state, so it converges.
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if send_event(&mut sender, &event).await.is_err() {
                        debug!("session write failed, dropping");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "session lagged behind broadcasts");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Apply mutation requests from this session.
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => handle_frame(&recv_state, &text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("session disconnected");
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), ()> {
    let json = serde_json::to_string(event).map_err(|_| ())?;
    sender.send(Message::Text(json.into())).await.map_err(|_| ())
}

/// Parse and apply one inbound frame. Malformed frames and no-op mutations
/// are logged and dropped; nothing here can take the hub down.
fn handle_frame(state: &AppState, text: &str) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "ignoring malformed frame");
            return;
        }
    };

    match event {
        ClientEvent::AddPatient(new) => {
            if let Err(e) = state.add_patient(new) {
                debug!(error = %e, "admission rejected");
            }
        }
        ClientEvent::UpdatePatient { id, updates } => state.update_patient(id, updates),
        ClientEvent::DeletePatient(id) => {
            state.delete_patient(id);
        }
        ClientEvent::ToggleAlert(mode) => state.toggle_alert(mode),
    }
}
