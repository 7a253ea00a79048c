use super::*;
use crate::services::probe::test_helpers::*;
use std::time::Instant;

fn ids(statuses: &[ModuleStatus]) -> Vec<&str> {
    statuses.iter().map(|s| s.module.id.as_str()).collect()
}

// =============================================================================
// ordering and cardinality
// =============================================================================

#[tokio::test]
async fn aggregate_empty_registry_is_empty() {
    let prober = StubProbe::new(Duration::from_secs(1));
    assert!(aggregate(&prober, &[]).await.is_empty());
    assert_eq!(prober.call_count(), 0);
}

#[tokio::test]
async fn aggregate_preserves_order_and_count_regardless_of_outcome() {
    let modules: Vec<_> = ["e", "d", "c", "b", "a"]
        .iter()
        .map(|id| descriptor(id, "http://unused", "/health"))
        .collect();
    let prober = StubProbe::new(Duration::from_secs(1))
        .with_result("d", false)
        .with_result("b", false)
        .with_delay("e", Duration::from_millis(150))
        .with_delay("a", Duration::from_millis(10));

    let statuses = aggregate(&prober, &modules).await;

    assert_eq!(statuses.len(), modules.len());
    assert_eq!(ids(&statuses), ["e", "d", "c", "b", "a"]);
    let availability: Vec<bool> = statuses.iter().map(|s| s.available).collect();
    assert_eq!(availability, [true, false, true, false, true]);
    assert_eq!(prober.call_count(), 5);
}

#[tokio::test]
async fn aggregate_copies_descriptor_fields() {
    let module = descriptor("chat", "http://chat.local", "/_stcore/health");
    let prober = StubProbe::new(Duration::from_secs(1));
    let statuses = aggregate(&prober, std::slice::from_ref(&module)).await;
    assert_eq!(statuses[0].module, module);
}

// =============================================================================
// concurrency
// =============================================================================

#[tokio::test]
async fn aggregate_runs_probes_concurrently() {
    let delay = Duration::from_millis(200);
    let modules: Vec<_> = (0..5)
        .map(|i| descriptor(&format!("m{i}"), "http://unused", "/health"))
        .collect();
    let mut prober = StubProbe::new(Duration::from_secs(2));
    for module in &modules {
        prober = prober.with_delay(&module.id, delay);
    }

    let started = Instant::now();
    let statuses = aggregate(&prober, &modules).await;
    let elapsed = started.elapsed();

    assert!(statuses.iter().all(|s| s.available));
    assert!(elapsed < delay * 3, "probes ran sequentially: {elapsed:?}");
}

#[tokio::test]
async fn aggregate_bounds_probe_that_ignores_its_timeout() {
    let modules = vec![
        descriptor("fast", "http://unused", "/health"),
        descriptor("stuck", "http://unused", "/health"),
    ];
    let prober = StubProbe::new(Duration::from_millis(100)).with_delay("stuck", Duration::from_secs(30));

    let started = Instant::now();
    let statuses = aggregate(&prober, &modules).await;
    let elapsed = started.elapsed();

    assert_eq!(ids(&statuses), ["fast", "stuck"]);
    assert!(statuses[0].available);
    assert!(!statuses[1].available);
    assert!(elapsed < Duration::from_secs(2), "deadline not enforced: {elapsed:?}");
}

// =============================================================================
// real HTTP
// =============================================================================

#[tokio::test]
async fn aggregate_one_up_one_hanging_over_http() {
    let timeout = Duration::from_millis(400);
    let up = spawn_module_server().await;
    let hanging = spawn_silent_server().await;
    let modules = vec![descriptor("a", &up, "/health"), descriptor("b", &hanging, "/health")];

    let started = Instant::now();
    let statuses = aggregate(&local_prober(timeout), &modules).await;
    let elapsed = started.elapsed();

    assert_eq!(ids(&statuses), ["a", "b"]);
    assert!(statuses[0].available);
    assert!(!statuses[1].available);
    assert!(elapsed < Duration::from_secs(3), "aggregate took {elapsed:?}");
}

#[tokio::test]
async fn aggregate_many_hanging_modules_take_about_one_timeout() {
    let timeout = Duration::from_millis(300);
    let hanging = spawn_silent_server().await;
    let modules: Vec<_> = (0..6)
        .map(|i| descriptor(&format!("h{i}"), &hanging, "/health"))
        .collect();

    let started = Instant::now();
    let statuses = aggregate(&local_prober(timeout), &modules).await;
    let elapsed = started.elapsed();

    assert_eq!(statuses.len(), 6);
    assert!(statuses.iter().all(|s| !s.available));
    assert!(elapsed < timeout * 4, "timeouts accumulated: {elapsed:?}");
}

#[tokio::test]
async fn aggregate_mixed_failures_over_http() {
    let base = spawn_module_server().await;
    let refused = refused_url().await;
    let modules = vec![
        descriptor("ok", &base, "/health"),
        descriptor("down", &base, "/down"),
        descriptor("refused", &refused, "/health"),
        descriptor("empty", &base, "/empty"),
    ];

    let statuses = aggregate(&local_prober(Duration::from_millis(500)), &modules).await;
    let availability: Vec<(&str, bool)> = statuses.iter().map(|s| (s.module.id.as_str(), s.available)).collect();
    assert_eq!(availability, [("ok", true), ("down", false), ("refused", false), ("empty", true)]);
}

// =============================================================================
// serialization
// =============================================================================

#[test]
fn module_status_serializes_flat_with_available() {
    let status = ModuleStatus { module: descriptor("a", "http://x", "/health"), available: true };
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["id"], "a");
    assert_eq!(json["url"], "http://x");
    assert_eq!(json["healthEndpoint"], "/health");
    assert_eq!(json["available"], true);
    assert!(json.get("module").is_none());
}
