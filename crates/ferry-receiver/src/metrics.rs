// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any installed recorder can collect these.
//! Without a recorder every call is a no-op.

use metrics::describe_counter;

/// Register all Ferry metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "ferry_events_total",
        "Inbound events by ingest outcome (ignored, presented, dispatched, redelivered)"
    );
    describe_counter!(
        "ferry_notifications_total",
        "Secondary-context notification operations by result"
    );
    describe_counter!(
        "ferry_dispatch_failures_total",
        "Durable pipeline runs that returned an error"
    );
}

/// Record the outcome of one ingest call.
pub fn record_event(outcome: &'static str) {
    metrics::counter!("ferry_events_total", "outcome" => outcome).increment(1);
}

/// Record a notification post or cancel.
pub fn record_notification(op: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!("ferry_notifications_total", "op" => op, "result" => result).increment(1);
}

/// Record a failed durable pipeline run.
pub fn record_dispatch_failure() {
    metrics::counter!("ferry_dispatch_failures_total").increment(1);
}
