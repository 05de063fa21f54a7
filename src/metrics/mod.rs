use prometheus::{
    Encoder, Gauge, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    register_gauge_with_registry, register_int_counter_vec_with_registry,
    register_int_gauge_with_registry,
};
use lazy_static::lazy_static;
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,

    pub http_requests: IntCounterVec,
    pub uptime_seconds: Gauge,
    pub process_memory_bytes: IntGauge,
    pub registered_processes: IntGauge,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests = register_int_counter_vec_with_registry!(
            Opts::new("continuity_http_requests_total", "Requests served per endpoint"),
            &["endpoint"],
            registry
        ).expect("valid http_requests metric");

        let uptime_seconds = register_gauge_with_registry!(
            Opts::new("continuity_uptime_seconds", "Seconds since the server started"),
            registry
        ).expect("valid uptime metric");

        let process_memory_bytes = register_int_gauge_with_registry!(
            Opts::new("continuity_process_memory_bytes", "Resident memory of the server process"),
            registry
        ).expect("valid memory metric");

        let registered_processes = register_int_gauge_with_registry!(
            Opts::new("continuity_registered_processes", "Entries in the process registry file"),
            registry
        ).expect("valid registry metric");

        Self {
            registry,
            http_requests,
            uptime_seconds,
            process_memory_bytes,
            registered_processes,
        }
    }

    pub fn hit(&self, endpoint: &str) {
        self.http_requests.with_label_values(&[endpoint]).inc();
    }

    pub fn render(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    pub static ref METRICS: Arc<MetricsRegistry> = Arc::new(MetricsRegistry::new());
}
