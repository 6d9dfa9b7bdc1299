//! Snapshot route for dashboards without a live socket.

use axum::{extract::State, Json};
use urgencia_core::patient::model::Patient;

use crate::state::AppState;

pub async fn list_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    Json(state.patients())
}
