use nvc_telemetry::{
    TelemetryMetrics, metrics, new_request_id, record_cache_hit, record_roi_commit,
};

#[test]
fn request_id_non_empty_and_unique() {
    let first = new_request_id();
    let second = new_request_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_cache_hit();
    record_roi_commit();
    record_roi_commit();
    let after = metrics().snapshot();
    assert!(after.cache_hits >= before.cache_hits + 1);
    assert!(after.roi_commits >= before.roi_commits + 2);
}

#[test]
fn fresh_metrics_start_at_zero() {
    let snapshot = TelemetryMetrics::new().snapshot();
    assert_eq!(snapshot, Default::default());
}
