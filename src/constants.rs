//! Crate-wide constants and defaults.

/// Default HTTP port for the gateway.
pub const DEFAULT_PORT: u16 = 8750;

/// Default bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default upload size ceiling in bytes (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default timeout for remote asset host calls, in seconds.
///
/// Keeps listing latency bounded when the remote host is degraded; a
/// timed-out existence check is classified as inconclusive, not missing.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 5;

/// Default number of concurrent remote existence checks during a listing.
pub const DEFAULT_CHECK_CONCURRENCY: usize = 8;

/// Default request timeout applied to the whole HTTP surface, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Filename of the record store inside the data directory.
pub const RECORDS_FILE: &str = "records.json";

/// Name of the blob directory inside the data directory.
pub const BLOBS_DIR: &str = "blobs";

/// Default filename used when an upload arrives without one.
pub const FALLBACK_UPLOAD_NAME: &str = "upload";
