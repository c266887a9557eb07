//! Core metrics traits (always compiled, no feature gate).
//!
//! Provides `MetricsRecorder` so that services can accept
//! `Arc<dyn MetricsRecorder>` unconditionally. Without the `metrics` feature
//! either `NoopMetrics` or `TracingMetrics` is injected.

use std::sync::Arc;

/// Fire-and-forget telemetry sink.
///
/// Implementations must be thread-safe (Send + Sync) and must never fail
/// the calling operation.
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    /// Record a named event, e.g. `"shortcut view"`
    fn record_event(&self, event: &str) {}
}

/// Noop metrics implementation for testing and non-metrics builds.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 每个事件输出一行 debug 日志
#[derive(Default)]
pub struct TracingMetrics;

impl MetricsRecorder for TracingMetrics {
    fn record_event(&self, event: &str) {
        tracing::debug!(event, "telemetry event");
    }
}

impl TracingMetrics {
    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self)
    }
}
