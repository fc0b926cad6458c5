//! Prometheus metrics for the Credo runtime.
//!
//! [`NodeMetrics`] owns a dedicated [`Registry`]; [`NodeMetrics::encode`]
//! renders it in the Prometheus text exposition format.

use prometheus::{
    register_gauge_with_registry, register_histogram_with_registry,
    register_int_counter_vec_with_registry, register_int_counter_with_registry, Encoder, Gauge,
    Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use credo_types::{ErrorKind, Value};

use crate::NodeError;

pub struct NodeMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Calls executed, by call name.
    pub calls: IntCounterVec,
    /// Calls that failed, by error kind.
    pub calls_failed: IntCounterVec,
    pub endorsements: IntCounter,
    pub credentials_issued: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Total value forwarded by endorsements, in whole units.
    pub value_forwarded: Gauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Time spent executing one call, in milliseconds.
    pub call_duration_ms: Histogram,
}

impl NodeMetrics {
    pub fn new() -> Result<Self, NodeError> {
        let registry = Registry::new();

        let calls = register_int_counter_vec_with_registry!(
            Opts::new("credo_calls_total", "Total calls executed"),
            &["call"],
            registry
        )?;

        let calls_failed = register_int_counter_vec_with_registry!(
            Opts::new("credo_calls_failed_total", "Total calls that failed"),
            &["kind"],
            registry
        )?;

        let endorsements = register_int_counter_with_registry!(
            Opts::new("credo_endorsements_total", "Total endorsements recorded"),
            registry
        )?;

        let credentials_issued = register_int_counter_with_registry!(
            Opts::new("credo_credentials_issued_total", "Total credentials issued"),
            registry
        )?;

        let value_forwarded = register_gauge_with_registry!(
            Opts::new(
                "credo_value_forwarded",
                "Value forwarded to endorsement recipients, in whole units"
            ),
            registry
        )?;

        let call_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new("credo_call_duration_ms", "Call execution time in milliseconds")
                .buckets(prometheus::exponential_buckets(0.01, 2.0, 16)?),
            registry
        )?;

        Ok(Self {
            registry,
            calls,
            calls_failed,
            endorsements,
            credentials_issued,
            value_forwarded,
            call_duration_ms,
        })
    }

    pub fn record_call(&self, call: &str) {
        self.calls.with_label_values(&[call]).inc();
    }

    pub fn record_failure(&self, kind: ErrorKind) {
        self.calls_failed.with_label_values(&[kind.as_str()]).inc();
    }

    pub fn record_endorsement(&self, amount: Value) {
        self.endorsements.inc();
        self.value_forwarded
            .add(amount.raw() as f64 / Value::UNIT as f64);
    }

    /// Render every metric in the text exposition format.
    pub fn encode(&self) -> Result<String, NodeError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()).into())
    }
}
