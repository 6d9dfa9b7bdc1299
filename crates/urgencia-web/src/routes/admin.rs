//! Administration-view gate.
//!
//! A static shared-secret comparison against an environment variable. This
//! is an external collaborator of the synchronization core, not part of it;
//! nothing here touches the hub.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable holding the staff password.
pub const ADMIN_PASSWORD_ENV: &str = "URGENCIA_ADMIN_PASSWORD";

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
}

pub async fn login(Json(req): Json<LoginRequest>) -> Json<LoginResponse> {
    let expected = std::env::var(ADMIN_PASSWORD_ENV).unwrap_or_default();
    if expected.is_empty() {
        warn!("{} is not set; admin login disabled", ADMIN_PASSWORD_ENV);
    }
    let authenticated = !expected.is_empty() && req.password == expected;
    Json(LoginResponse { authenticated })
}
