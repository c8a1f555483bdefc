//! Prometheus metrics for cachefront
//!
//! Each facade owns its own registry; embedding applications expose
//! [`Metrics::gather`] however they serve metrics.

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};

/// Facade-side operation and outcome counters
pub struct Metrics {
    pub registry: Registry,

    // Operation counters
    pub op_read: IntCounter,
    pub op_write: IntCounter,
    pub op_fetch: IntCounter,
    pub op_delete: IntCounter,
    pub op_clear: IntCounter,

    // Fetch outcome counters
    pub fetch_hits: IntCounter,
    pub fetch_misses: IntCounter,

    // Error and retry counters
    pub backend_errors: IntCounter,
    pub type_retries: IntCounter,

    // Producer latency on the fetch miss path
    pub producer_seconds: Histogram,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        let registry = Registry::new();

        let op_read =
            IntCounter::new("cachefront_op_read_total", "Total read operations").unwrap();
        let op_write =
            IntCounter::new("cachefront_op_write_total", "Total write operations").unwrap();
        let op_fetch =
            IntCounter::new("cachefront_op_fetch_total", "Total fetch operations").unwrap();
        let op_delete =
            IntCounter::new("cachefront_op_delete_total", "Total delete operations").unwrap();
        let op_clear =
            IntCounter::new("cachefront_op_clear_total", "Total clear operations").unwrap();

        let fetch_hits =
            IntCounter::new("cachefront_fetch_hits_total", "Total fetch hits").unwrap();
        let fetch_misses =
            IntCounter::new("cachefront_fetch_misses_total", "Total fetch misses").unwrap();

        let backend_errors = IntCounter::new(
            "cachefront_backend_errors_total",
            "Backend errors folded into fallback values",
        )
        .unwrap();
        let type_retries = IntCounter::new(
            "cachefront_type_retries_total",
            "Retries after unresolved-type backend errors",
        )
        .unwrap();

        let producer_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "cachefront_producer_seconds",
                "Producer latency on fetch misses in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ]),
        )
        .unwrap();

        // Register all metrics
        registry.register(Box::new(op_read.clone())).unwrap();
        registry.register(Box::new(op_write.clone())).unwrap();
        registry.register(Box::new(op_fetch.clone())).unwrap();
        registry.register(Box::new(op_delete.clone())).unwrap();
        registry.register(Box::new(op_clear.clone())).unwrap();
        registry.register(Box::new(fetch_hits.clone())).unwrap();
        registry.register(Box::new(fetch_misses.clone())).unwrap();
        registry
            .register(Box::new(backend_errors.clone()))
            .unwrap();
        registry.register(Box::new(type_retries.clone())).unwrap();
        registry
            .register(Box::new(producer_seconds.clone()))
            .unwrap();

        Self {
            registry,
            op_read,
            op_write,
            op_fetch,
            op_delete,
            op_clear,
            fetch_hits,
            fetch_misses,
            backend_errors,
            type_retries,
            producer_seconds,
        }
    }

    /// Get Prometheus formatted metrics
    pub fn gather(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        metrics.op_read.inc();
        metrics.fetch_hits.inc();
        metrics.producer_seconds.observe(0.003);

        let output = metrics.gather();
        assert!(output.contains("cachefront_op_read_total"));
        assert!(output.contains("cachefront_fetch_hits_total"));
        assert!(output.contains("cachefront_producer_seconds"));
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.fetch_misses.inc();
        metrics.fetch_misses.inc();
        assert_eq!(metrics.fetch_misses.get(), 2);
    }
}
