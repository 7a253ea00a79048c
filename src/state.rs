//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! assembled once at startup from `GatewayConfig` and never mutated: the
//! credential store, module registry, token service and prober are all
//! read-only, so handlers share them through `Arc` without locking.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::services::credentials::CredentialStore;
use crate::services::probe::HealthProbe;
use crate::services::registry::ModuleRegistry;
use crate::services::token::TokenService;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub registry: Arc<ModuleRegistry>,
    pub tokens: Arc<TokenService>,
    pub prober: Arc<dyn HealthProbe>,
    /// Reported by `GET /health`.
    pub service_name: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: &GatewayConfig,
        credentials: Arc<dyn CredentialStore>,
        registry: ModuleRegistry,
        prober: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            credentials,
            registry: Arc::new(registry),
            tokens: Arc::new(TokenService::new(&config.secret_key, config.token_ttl)),
            prober,
            service_name: Arc::from(config.service_name.as_str()),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::services::credentials::{Credential, StaticCredentialStore};
    use crate::services::registry::ModuleDescriptor;

    /// Credentials shared by route tests: `admin/admin123` (admin) and
    /// `demo/demo123` (user).
    #[must_use]
    pub fn test_credentials() -> StaticCredentialStore {
        StaticCredentialStore::new(vec![
            Credential { username: "admin".into(), password: "admin123".into(), role: "admin".into() },
            Credential { username: "demo".into(), password: "demo123".into(), role: "user".into() },
        ])
        .expect("test credentials are unique")
    }

    /// Create a test `AppState` over the given modules and prober.
    #[must_use]
    pub fn test_app_state(modules: Vec<ModuleDescriptor>, prober: Arc<dyn HealthProbe>) -> AppState {
        let registry = ModuleRegistry::new(modules).expect("test module ids are unique");
        AppState::new(&GatewayConfig::default(), Arc::new(test_credentials()), registry, prober)
    }
}
