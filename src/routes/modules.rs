//! Module listing and gateway liveness routes.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::auth::AuthUser;
use crate::services::status::{self, ModuleStatus};
use crate::state::AppState;

/// `GET /modules` — probe every registered module and return statuses in
/// registry order.
pub async fn list_modules(State(state): State<AppState>, auth: AuthUser) -> Json<Vec<ModuleStatus>> {
    let statuses = status::aggregate(state.prober.as_ref(), state.registry.list_modules()).await;
    tracing::debug!(user = %auth.claims.sub, modules = statuses.len(), "module statuses served");
    Json(statuses)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

/// `GET /health` — unauthenticated liveness check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    Json(HealthResponse { status: "healthy", service: state.service_name.to_string(), timestamp })
}

#[cfg(test)]
#[path = "modules_test.rs"]
mod tests;
