//! Patient self-lookup route.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use urgencia_core::patient::model::Patient;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct LookupRequest {
    pub code: String,
    pub rut: String,
}

/// Look a patient up by code plus national id. The rut is treated as a
/// shared secret: a wrong pair gets the same 404 as an unknown code.
pub async fn lookup_patient(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<Patient>, (StatusCode, String)> {
    state
        .lookup(&req.code, &req.rut)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "No patient matches".to_string()))
}
