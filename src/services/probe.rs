//! Health prober — one bounded GET against a module's health endpoint.
//!
//! A probe answers a yes/no question. Timeouts, refused connections, DNS
//! failures and non-2xx statuses all collapse to `false`; nothing is retried
//! and nothing is returned as an error.

use std::time::Duration;

use async_trait::async_trait;

use super::registry::ModuleDescriptor;

/// Availability check for a single module.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// True iff the module answered its health endpoint with a 2xx status in time.
    async fn probe(&self, module: &ModuleDescriptor) -> bool;

    /// Upper bound a single probe is expected to take.
    fn timeout(&self) -> Duration;
}

/// `reqwest`-backed prober sharing one connection pool across probes.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    /// Build a prober whose requests are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = client_builder(timeout).build()?;
        Ok(Self::with_client(client, timeout))
    }

    /// Wrap an existing client. `timeout` is applied per request.
    #[must_use]
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

/// Client settings every prober shares. Redirects are not followed: the
/// health endpoint itself must answer 2xx.
fn client_builder(timeout: Duration) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
}

#[async_trait]
impl HealthProbe for HttpProber {
    async fn probe(&self, module: &ModuleDescriptor) -> bool {
        let url = module.health_url();
        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::debug!(module = %module.id, %url, status = resp.status().as_u16(), "probe returned non-success status");
                false
            }
            Err(e) => {
                tracing::debug!(module = %module.id, %url, timeout = e.is_timeout(), error = %e, "probe failed");
                false
            }
        }
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
