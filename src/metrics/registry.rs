//! Global Prometheus registry

use std::sync::Arc;

use once_cell::sync::Lazy;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::metrics_core::MetricsRecorder;

/// Global metrics instance
pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

pub struct Metrics {
    registry: Registry,
    /// Telemetry events by name
    pub events_total: CounterVec,
}

impl Metrics {
    fn new() -> Self {
        let registry = Registry::new();

        let events_total = CounterVec::new(
            Opts::new("linkhub_events_total", "Total number of events by name"),
            &["event"],
        )
        .expect("Failed to create events_total metric");

        registry
            .register(Box::new(events_total.clone()))
            .expect("Failed to register events_total");

        Self {
            registry,
            events_total,
        }
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Delegates to the global `METRICS` singleton.
///
/// `Lazy<T>` doesn't implement `Clone`, so services hold this wrapper as
/// `Arc<dyn MetricsRecorder>` instead.
pub struct PrometheusMetrics;

impl MetricsRecorder for PrometheusMetrics {
    fn record_event(&self, event: &str) {
        METRICS.events_total.with_label_values(&[event]).inc();
    }
}

impl PrometheusMetrics {
    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self)
    }
}
