//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, status
//! - `gateway_request_duration_seconds` (histogram): inbound latency by route
//! - `gateway_upstream_duration_seconds` (histogram): upstream call latency by route, outcome
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests need no setup
//! - Prometheus exposition only when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "gateway_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call. `outcome` is `ok` or a `ProxyError::kind` label.
pub fn record_upstream(route: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::histogram!(
        "gateway_upstream_duration_seconds",
        "route" => route,
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}

/// In-process recorder for asserting on recorded histograms.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use ::metrics::{
        Counter, Gauge, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };

    type Samples = Arc<Mutex<Vec<(String, f64)>>>;

    #[derive(Default)]
    pub(crate) struct CapturingRecorder {
        samples: Samples,
    }

    impl CapturingRecorder {
        /// Every value recorded into histogram `name`, in order.
        pub(crate) fn histogram(&self, name: &str) -> Vec<f64> {
            self.samples
                .lock()
                .unwrap()
                .iter()
                .filter(|(n, _)| n == name)
                .map(|(_, v)| *v)
                .collect()
        }
    }

    struct Sink {
        name: String,
        samples: Samples,
    }

    impl HistogramFn for Sink {
        fn record(&self, value: f64) {
            self.samples.lock().unwrap().push((self.name.clone(), value));
        }
    }

    impl Recorder for CapturingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::from_arc(Arc::new(Sink {
                name: key.name().to_string(),
                samples: self.samples.clone(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CapturingRecorder;
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_request_latency_measured_from_given_start() {
        let recorder = CapturingRecorder::default();
        let start = Instant::now();
        std::thread::sleep(Duration::from_millis(20));

        ::metrics::with_local_recorder(&recorder, || record_request("states", 200, start));

        let samples = recorder.histogram("gateway_request_duration_seconds");
        assert_eq!(samples.len(), 1);
        assert!(samples[0] >= 0.02, "got {}", samples[0]);
    }
}
