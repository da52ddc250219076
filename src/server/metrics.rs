//! Prometheus metrics for the HTTP API.
//!
//! Handlers call the `record_*`/`set_*` helpers; the `/metrics` endpoint
//! renders the accumulated state through the [`PrometheusHandle`] kept in
//! the application state.

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use parking_lot::Mutex;
use std::sync::OnceLock;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static INSTALL: Mutex<()> = Mutex::new(());

/// Returns the process-wide Prometheus handle, installing the recorder on
/// first use.
///
/// The recorder is global to the process, so repeated callers (including
/// tests that start several servers) share one handle.
pub(crate) fn prometheus_handle() -> Result<PrometheusHandle> {
    if let Some(handle) = HANDLE.get() {
        return Ok(handle.clone());
    }

    let _guard = INSTALL.lock();
    if let Some(handle) = HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus metrics recorder")?;
    describe_metrics();
    let _ = HANDLE.set(handle.clone());
    Ok(handle)
}

fn describe_metrics() {
    describe_counter!(
        "pixgate_operations_total",
        "Gateway operations handled, labeled by operation"
    );
    describe_counter!("pixgate_upload_bytes_total", "Bytes accepted by uploads");
    describe_counter!(
        "pixgate_records_purged_total",
        "Records purged because their local blob vanished"
    );
    describe_counter!(
        "pixgate_remote_checks_inconclusive_total",
        "Remote existence checks that did not produce a definitive answer"
    );
    describe_gauge!(
        "pixgate_records",
        "Record count observed by the most recent listing"
    );
}

/// Record a gateway operation (upload, list, restore, delete, serve).
pub(crate) fn record_operation(op: &str) {
    counter!("pixgate_operations_total", "op" => op.to_string()).increment(1);
}

/// Record bytes accepted by a successful upload.
pub(crate) fn record_upload_bytes(bytes: u64) {
    counter!("pixgate_upload_bytes_total").increment(bytes);
}

/// Record stale records purged during a listing.
pub(crate) fn record_purged(count: usize) {
    if count > 0 {
        counter!("pixgate_records_purged_total").increment(count as u64);
    }
}

/// Record remote existence checks that came back inconclusive.
pub(crate) fn record_inconclusive_checks(count: usize) {
    if count > 0 {
        counter!("pixgate_remote_checks_inconclusive_total").increment(count as u64);
    }
}

/// Track the record count observed by the most recent listing.
pub(crate) fn set_record_count(count: usize) {
    gauge!("pixgate_records").set(count as f64);
}
