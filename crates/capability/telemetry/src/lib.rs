//! 追踪初始化、请求 ID 生成与控制台计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_invalidations: u64,
    pub transport_failures: u64,
    pub roi_commits: u64,
    pub roi_discards: u64,
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_invalidations: AtomicU64,
    transport_failures: AtomicU64,
    roi_commits: AtomicU64,
    roi_discards: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            cache_invalidations: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
            roi_commits: AtomicU64::new(0),
            roi_discards: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_invalidations: self.cache_invalidations.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            roi_commits: self.roi_commits.load(Ordering::Relaxed),
            roi_discards: self.roi_discards.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可用 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成出站请求的 request_id。
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录列表缓存命中。
pub fn record_cache_hit() {
    metrics().cache_hits.fetch_add(1, Ordering::Relaxed);
}

/// 记录列表缓存未命中（触发后端拉取）。
pub fn record_cache_miss() {
    metrics().cache_misses.fetch_add(1, Ordering::Relaxed);
}

/// 记录列表缓存失效。
pub fn record_cache_invalidation() {
    metrics()
        .cache_invalidations
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录传输失败（列表/创建/更新/删除）。
pub fn record_transport_failure() {
    metrics()
        .transport_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录 ROI 提交。
pub fn record_roi_commit() {
    metrics().roi_commits.fetch_add(1, Ordering::Relaxed);
}

/// 记录退化/取消的 ROI 手势。
pub fn record_roi_discard() {
    metrics().roi_discards.fetch_add(1, Ordering::Relaxed);
}
