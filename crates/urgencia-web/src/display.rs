//! Server-driven waiting-room display feed.
//!
//! Each display surface connects to `/ws/display` and gets a rotation
//! controller of its own: the pager advances on a fixed cadence, and every
//! snapshot broadcast re-derives the waiting queue and re-anchors the
//! pager to page 0 on length changes. The phase is local to the
//! connection; two displays are free to show different pages.

use std::time::Duration;

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
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use urgencia_core::patient::model::Patient;
use urgencia_core::queue::waiting_queue;
use urgencia_core::rotation::{RotationController, PAGE_CAPACITY, ROTATION_INTERVAL_SECS};

use crate::protocol::{DisplayEvent, DisplayPage, ServerEvent};
use crate::state::AppState;

/// WebSocket upgrade handler for `/ws/display`.
pub async fn display_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_display(socket, state))
}

async fn handle_display(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe();

    let (snapshot, alert_mode) = state.connect_state();
    let mut queue = waiting_queue(&snapshot);
    let mut pager = RotationController::new(PAGE_CAPACITY);
    pager.sync_len(queue.len());

    if send_event(&mut sender, &DisplayEvent::UpdateAlertMode(alert_mode))
        .await
        .is_err()
    {
        return;
    }
    if send_page(&mut sender, &pager, &queue).await.is_err() {
        return;
    }

    info!("display connected");

    let mut ticker = tokio::time::interval(Duration::from_secs(ROTATION_INTERVAL_SECS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // An interval's first tick completes immediately; the initial page has
    // already been sent, so consume it without advancing.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                pager.tick();
                if send_page(&mut sender, &pager, &queue).await.is_err() {
                    break;
                }
            }
            event = rx.recv() => match event {
                Ok(ServerEvent::UpdatePatients(snapshot)) => {
                    queue = waiting_queue(&snapshot);
                    pager.sync_len(queue.len());
                    if send_page(&mut sender, &pager, &queue).await.is_err() {
                        break;
                    }
                }
                Ok(ServerEvent::UpdateAlertMode(mode)) => {
                    if send_event(&mut sender, &DisplayEvent::UpdateAlertMode(mode))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "display lagged, resyncing from the store");
                    queue = waiting_queue(&state.patients());
                    pager.sync_len(queue.len());
                    if send_page(&mut sender, &pager, &queue).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    info!("display disconnected");
}

async fn send_page(
    sender: &mut SplitSink<WebSocket, Message>,
    pager: &RotationController,
    queue: &[Patient],
) -> Result<(), ()> {
    let event = DisplayEvent::UpdateDisplay(DisplayPage {
        page: pager.page(),
        page_count: pager.page_count(),
        patients: pager.window(queue).to_vec(),
    });
    send_event(sender, &event).await
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &DisplayEvent,
) -> Result<(), ()> {
    let json = serde_json::to_string(event).map_err(|_| ())?;
    sender.send(Message::Text(json.into())).await.map_err(|_| ())
}
