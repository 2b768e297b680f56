/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
#![allow(clippy::expect_used)]

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::{
    opts, register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};

pub static INCOMING_API: once_cell::sync::Lazy<HistogramVec> = once_cell::sync::Lazy::new(|| {
    register_histogram_vec!(
        opts!("http_request_duration_seconds", "Incoming API requests").into(),
        &["method", "handler", "status_code", "code", "version"]
    )
    .expect("Failed to register incoming API metrics")
});

pub static CALL_EXTERNAL_API: once_cell::sync::Lazy<HistogramVec> =
    once_cell::sync::Lazy::new(|| {
        register_histogram_vec!(
            opts!("external_request_duration", "Call external API requests").into(),
            &["method", "host", "service", "status"]
        )
        .expect("Failed to register call external API metrics")
    });

pub static SCREEN_TRANSITIONS: once_cell::sync::Lazy<IntCounterVec> =
    once_cell::sync::Lazy::new(|| {
        register_int_counter_vec!(
            opts!("screen_transitions", "Screen flow transitions"),
            &["app", "from", "to"]
        )
        .expect("Failed to register screen transition metrics")
    });

pub static LOOKUP_FALLBACKS: once_cell::sync::Lazy<IntCounterVec> =
    once_cell::sync::Lazy::new(|| {
        register_int_counter_vec!(
            opts!("lookup_fallbacks", "Lookup sources skipped on failure"),
            &["source", "reason"]
        )
        .expect("Failed to register lookup fallback metrics")
    });

pub static LIVE_SESSIONS: once_cell::sync::Lazy<IntGaugeVec> = once_cell::sync::Lazy::new(|| {
    register_int_gauge_vec!(opts!("live_sessions", "Live app sessions"), &["app"])
        .expect("Failed to register live session metrics")
});

/// Observes the latency of an incoming request into `INCOMING_API`.
///
/// * `$method` - HTTP method.
/// * `$endpoint` - Route with path parameters replaced by placeholders.
/// * `$status` - Response status code.
/// * `$code` - Error code, or `SUCCESS`.
/// * `$start` - `Instant` at which the request was received.
#[macro_export]
macro_rules! incoming_api {
    ($method:expr, $endpoint:expr, $status:expr, $code:expr, $start:expr) => {
        let duration = $start.elapsed().as_secs_f64();
        let version = std::env::var("DEPLOYMENT_VERSION").unwrap_or("DEV".to_string());
        $crate::tools::prometheus::INCOMING_API
            .with_label_values(&[$method, $endpoint, $status, $code, version.as_str()])
            .observe(duration);
    };
}

/// Observes the latency of an outgoing call into `CALL_EXTERNAL_API`.
#[macro_export]
macro_rules! call_external_api {
    ($method:expr, $host:expr, $path:expr, $status:expr, $start:expr) => {
        let duration = $start.elapsed().as_secs_f64();
        $crate::tools::prometheus::CALL_EXTERNAL_API
            .with_label_values(&[$method, $host, $path, $status])
            .observe(duration);
    };
}

#[macro_export]
macro_rules! screen_transition {
    ($app:expr, $from:expr, $to:expr) => {
        $crate::tools::prometheus::SCREEN_TRANSITIONS
            .with_label_values(&[$app, $from, $to])
            .inc();
    };
}

#[macro_export]
macro_rules! lookup_fallback {
    ($source:expr, $reason:expr) => {
        $crate::tools::prometheus::LOOKUP_FALLBACKS
            .with_label_values(&[$source, $reason])
            .inc();
    };
}

/// Builds the actix prometheus middleware serving `/metrics` with the service metrics registered.
///
/// # Panics
///
/// * If the builder fails or a metric is registered twice.
pub fn prometheus_metrics() -> PrometheusMetrics {
    let prometheus = PrometheusMetricsBuilder::new("ride_mate")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus Metrics");

    prometheus
        .registry
        .register(Box::new(INCOMING_API.to_owned()))
        .expect("Failed to register incoming API metrics");

    prometheus
        .registry
        .register(Box::new(CALL_EXTERNAL_API.to_owned()))
        .expect("Failed to register call external API metrics");

    prometheus
        .registry
        .register(Box::new(SCREEN_TRANSITIONS.to_owned()))
        .expect("Failed to register screen transition metrics");

    prometheus
        .registry
        .register(Box::new(LOOKUP_FALLBACKS.to_owned()))
        .expect("Failed to register lookup fallback metrics");

    prometheus
        .registry
        .register(Box::new(LIVE_SESSIONS.to_owned()))
        .expect("Failed to register live session metrics");

    prometheus
}
