//! Urgencia Web Server
//!
//! Axum-based synchronization hub: WebSocket sessions, the waiting-room
//! display feed and the REST collaborators (lookup, admin gate).

pub mod display;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Any origin may connect; the viewers are served from elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/patients", get(routes::patients::list_patients))
        .route("/lookup", post(routes::lookup::lookup_patient))
        .route("/admin/login", post(routes::admin::login))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .route("/ws/display", get(display::display_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the synchronization hub.
pub async fn run_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Sync hub listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
