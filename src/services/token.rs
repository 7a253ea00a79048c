//! Token service — stateless HS256 access tokens.
//!
//! ARCHITECTURE
//! ============
//! Tokens are compact JWTs carrying `sub`, `role`, `iat` and `exp`, signed
//! with one process-wide secret taken from `GatewayConfig`. Verification
//! checks the signature first and only then looks at claims; expiry is
//! enforced here with zero leeway (`now >= exp` is expired) instead of by the
//! library's skew-tolerant check.
//!
//! TRADE-OFFS
//! ==========
//! There is no revocation list and no refresh flow. A leaked token stays
//! valid until it expires.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const ALGORITHM: Algorithm = Algorithm::HS256;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token expired")]
    Expired,
    #[error("token signing failed: {0}")]
    Signing(String),
}

// =============================================================================
// CLAIMS
// =============================================================================

/// Verified identity carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    pub role: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Configured token lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token with the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, role, self.ttl)
    }

    /// Issue a token with an explicit lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue_with_ttl(&self, subject: &str, role: &str, ttl: Duration) -> Result<String, AuthError> {
        self.issue_at(subject, role, ttl, unix_now())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue_at(&self, subject: &str, role: &str, ttl: Duration, now: i64) -> Result<String, AuthError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims { sub: subject.to_owned(), role: role.to_owned(), iat: now, exp: now.saturating_add(ttl_secs) };
        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for bad signatures or malformed
    /// payloads and [`AuthError::Expired`] once `exp` is reached.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, unix_now())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// See [`TokenService::verify`].
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let claims = data.claims;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".into()));
        }
        if now >= claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
