//! Auth routes — password login and the bearer-token extractor.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use serde::{Deserialize, Serialize};

use crate::services::token::{AuthError, Claims};
use crate::state::AppState;

const LOGIN_FAILED_DETAIL: &str = "Incorrect username or password";
const INVALID_TOKEN_DETAIL: &str = "Invalid authentication credentials";

// =============================================================================
// ERROR MAPPING
// =============================================================================

#[derive(Serialize)]
struct ErrorDetail {
    detail: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, Json(ErrorDetail { detail: LOGIN_FAILED_DETAIL })).into_response()
            }
            Self::MissingToken | Self::InvalidToken(_) | Self::Expired => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, "Bearer")],
                Json(ErrorDetail { detail: INVALID_TOKEN_DETAIL }),
            )
                .into_response(),
            Self::Signing(e) => {
                tracing::error!(error = %e, "token signing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail { detail: "Internal server error" })).into_response()
            }
        }
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Identity extracted from a verified `Authorization: Bearer` token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub claims: Claims,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AuthError::MissingToken
                    } else {
                        AuthError::InvalidToken("malformed authorization header".into())
                    }
                })?;

        let app_state = AppState::from_ref(state);
        let claims = app_state.tokens.verify(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            e
        })?;

        Ok(Self { claims })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// `POST /auth/login` — exchange username/password for a bearer token.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
    let Some(credential) = state.credentials.authenticate(&req.username, &req.password) else {
        tracing::warn!(username = %req.username, "login failed");
        return Err(AuthError::InvalidCredentials);
    };

    let access_token = state.tokens.issue(&credential.username, &credential.role)?;
    tracing::info!(username = %credential.username, role = %credential.role, "login succeeded");

    Ok(Json(TokenResponse { access_token, token_type: "bearer" }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
