//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the gateway's three HTTP endpoints under a single Axum
//! router: `POST /auth/login` issues tokens, `GET /modules` returns live module
//! availability to bearer-authenticated callers, and `GET /health` is an
//! unauthenticated liveness probe for the gateway itself.

pub mod auth;
pub mod modules;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsOrigins;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, origins: &CorsOrigins) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/modules", get(modules::list_modules))
        .route("/health", get(modules::health))
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` cannot carry credentials, so only an explicit origin list allows them.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
