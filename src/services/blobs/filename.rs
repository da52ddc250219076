//! Filename generation and validation for the blob store.
//!
//! Provides protection against directory traversal attacks and generates
//! collision-free storage names from client-supplied upload names.

use anyhow::{Result, bail};
use uuid::Uuid;

use crate::constants::FALLBACK_UPLOAD_NAME;

/// Maximum length of the sanitized original-name suffix.
const MAX_SUFFIX_LEN: usize = 80;

/// Validates a blob filename as supplied by a caller.
///
/// # Security
/// Rejects names that:
/// - Are empty
/// - Contain path separators (`/` or `\`), so a name is always a single
///   path component
/// - Start with a dot (hidden files, and the `.` / `..` components)
///
/// # Errors
///
/// Returns an error describing the first violated rule.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        bail!("Blob filename cannot be empty");
    }
    if filename.contains('/') || filename.contains('\\') {
        bail!("Blob filename cannot contain path separators: {filename}");
    }
    if filename.starts_with('.') {
        bail!("Blob filename cannot start with '.': {filename}");
    }
    Ok(())
}

/// Generates a unique storage filename from a client-supplied name.
///
/// The result is `{random}_{sanitized}` where `random` is a fresh UUID and
/// `sanitized` keeps only `[A-Za-z0-9._-]` from the original name, truncated
/// to a bounded length. The random prefix makes the name unique; the suffix
/// keeps the directory listing readable for operators.
#[must_use]
pub fn generate_filename(original_name: &str) -> String {
    let sanitized = sanitize(original_name);
    format!("{}_{sanitized}", Uuid::new_v4().simple())
}

/// Reduces a client-supplied name to a safe suffix.
fn sanitize(name: &str) -> String {
    // Strip any client-side directory components first
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(FALLBACK_UPLOAD_NAME);

    let mut out: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Leading dots would produce hidden files after the prefix is removed
    while out.starts_with('.') {
        out.remove(0);
    }

    if out.is_empty() {
        out = FALLBACK_UPLOAD_NAME.to_string();
    }
    if out.len() > MAX_SUFFIX_LEN {
        out.truncate(MAX_SUFFIX_LEN);
    }
    out
}
