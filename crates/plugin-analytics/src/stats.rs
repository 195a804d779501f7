//! Request counters owned by the analytics plugin.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

/// Per-route request counters.
#[derive(Debug)]
pub struct AnalyticsStats {
    /// When counting started.
    started_at: DateTime<Utc>,
    /// Total requests seen.
    total: AtomicU64,
    /// Request path → hit count.
    by_path: DashMap<String, u64>,
}

/// Point-in-time view of the counters, serialized by the analytics route.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    /// Total requests seen.
    pub total_requests: u64,
    /// When counting started.
    pub since: DateTime<Utc>,
    /// Hit counts keyed by request path, sorted for stable output.
    pub routes: BTreeMap<String, u64>,
}

impl AnalyticsStats {
    /// Creates counters starting now.
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total: AtomicU64::new(0),
            by_path: DashMap::new(),
        }
    }

    /// Records one request for `path`.
    pub fn record(&self, path: &str) {
        self.total.fetch_add(1, Ordering::Relaxed);
        *self.by_path.entry(path.to_string()).or_insert(0) += 1;
    }

    /// Returns a snapshot of the counters.
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_requests: self.total.load(Ordering::Relaxed),
            since: self.started_at,
            routes: self
                .by_path
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
        }
    }
}

impl Default for AnalyticsStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_per_path_and_total() {
        let stats = AnalyticsStats::new();
        stats.record("/api/haikus");
        stats.record("/api/haikus");
        stats.record("/");

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.routes.get("/api/haikus"), Some(&2));
        assert_eq!(snapshot.routes.get("/"), Some(&1));
    }

    #[test]
    fn test_empty_snapshot() {
        let stats = AnalyticsStats::new();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_requests, 0);
        assert!(snapshot.routes.is_empty());
    }
}
