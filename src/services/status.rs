//! Module status aggregation — concurrent fan-out of health probes.
//!
//! DESIGN
//! ======
//! One future per descriptor, joined with `join_all`, so total latency tracks
//! the slowest single probe instead of the sum. Each future also carries its
//! own deadline (probe timeout plus a small grace period) so a `HealthProbe`
//! that ignores its timeout still resolves to unavailable. Results come back
//! in registry order and are never cached.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use super::probe::HealthProbe;
use super::registry::ModuleDescriptor;

const PROBE_GRACE: Duration = Duration::from_millis(500);

/// A descriptor plus its live availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    #[serde(flatten)]
    pub module: ModuleDescriptor,
    pub available: bool,
}

/// Probe every module concurrently and return statuses in input order.
pub async fn aggregate(prober: &dyn HealthProbe, modules: &[ModuleDescriptor]) -> Vec<ModuleStatus> {
    let deadline = prober.timeout().saturating_add(PROBE_GRACE);

    let checks = modules.iter().map(|module| async move {
        let available = if let Ok(available) = tokio::time::timeout(deadline, prober.probe(module)).await {
            available
        } else {
            tracing::warn!(module = %module.id, ?deadline, "probe exceeded its deadline");
            false
        };
        ModuleStatus { module: module.clone(), available }
    });

    let statuses = join_all(checks).await;
    let available = statuses.iter().filter(|status| status.available).count();
    tracing::debug!(total = statuses.len(), available, "module statuses aggregated");
    statuses
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
