//! Per-source adapters for the fetch → normalize pipeline.
//!
//! Each data source implements [`Source`]: `fetch` pulls raw provider-shaped
//! JSON records (paginating with a fixed inter-request sleep), `normalize`
//! maps one raw record into the source's flat lead schema. The pipeline in
//! `app::pipeline` is generic over this trait, which is what keeps the
//! near-duplicate per-source scripts collapsed into one code path.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

pub mod finra;
pub mod nih;
pub mod npi;
pub mod yc;

pub use finra::FinraSource;
pub use nih::NihSource;
pub use npi::NpiSource;
pub use yc::YcSource;

/// A lead data source: paginated fetch plus pure per-record normalization.
pub trait Source {
    /// The flat output record this source produces.
    type Lead: Serialize;

    /// Short name for console output ("npi", "finra", ...).
    fn name(&self) -> &'static str;

    /// Fetch raw records up to the configured target.
    ///
    /// Transport/HTTP failures on a page are logged to stderr and that page
    /// is skipped; whatever was fetched before the failure is still returned.
    fn fetch(&self) -> Result<Vec<Value>, AppError>;

    /// Map one raw record into a lead, or `None` when the identifying field
    /// (company/organization name) cannot be derived.
    fn normalize(&self, raw: &Value) -> Option<Self::Lead>;
}

/// Fixed inter-request sleep (the only rate limiting any of these sources need).
pub(crate) fn rate_limit(ms: u64) {
    std::thread::sleep(Duration::from_millis(ms));
}

/// Walk a dot-separated path into a JSON value.
pub(crate) fn pluck<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = current.get(key)?;
    }
    Some(current)
}

/// First non-empty string found at any of the candidate paths.
///
/// Providers move fields around between API versions; normalizers list every
/// known location and the first match wins.
pub(crate) fn str_at<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a str> {
    for path in paths {
        if let Some(s) = pluck(value, path).and_then(Value::as_str) {
            let s = s.trim();
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

/// Like [`str_at`] with an empty-string default.
pub(crate) fn str_or_empty(value: &Value, paths: &[&str]) -> String {
    str_at(value, paths).unwrap_or("").to_string()
}

/// First element of an array at `path`, if any.
pub(crate) fn first_of<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    pluck(value, path)?.as_array()?.first()
}

/// Truncate to at most `max` characters (not bytes), provider strings are
/// arbitrary UTF-8.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
