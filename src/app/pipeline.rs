//! Fetch-normalize-export plumbing shared by every source command.

use std::path::Path;

use crate::error::AppError;
use crate::io::export::write_csv;
use crate::source::Source;

/// Fetch raw records and normalize them into leads.
///
/// Records the normalizer rejects are dropped silently; an entirely empty
/// result is an error (exit 3) so callers never write a header-only CSV.
pub fn collect<S: Source>(source: &S) -> Result<Vec<S::Lead>, AppError> {
    let raw = source.fetch()?;
    let fetched = raw.len();

    let leads: Vec<S::Lead> = raw.iter().filter_map(|r| source.normalize(r)).collect();
    println!(
        "[{}] fetched {fetched} records, kept {}",
        source.name(),
        leads.len()
    );

    if leads.is_empty() {
        return Err(AppError::new(
            3,
            format!("No usable records from {}.", source.name()),
        ));
    }
    Ok(leads)
}

/// Run a source end to end and write the result CSV.
pub fn run_to_csv<S: Source>(source: &S, output: &Path) -> Result<Vec<S::Lead>, AppError> {
    let leads = collect(source)?;
    write_csv(output, &leads)?;
    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct FakeSource {
        records: Vec<Value>,
    }

    impl Source for FakeSource {
        type Lead = String;

        fn name(&self) -> &'static str {
            "fake"
        }

        fn fetch(&self) -> Result<Vec<Value>, AppError> {
            Ok(self.records.clone())
        }

        fn normalize(&self, raw: &Value) -> Option<String> {
            raw.get("name").and_then(Value::as_str).map(str::to_string)
        }
    }

    #[test]
    fn collect_drops_records_the_normalizer_rejects() {
        let source = FakeSource {
            records: vec![json!({"name": "a"}), json!({}), json!({"name": "b"})],
        };
        let leads = collect(&source).unwrap();
        assert_eq!(leads, vec!["a", "b"]);
    }

    #[test]
    fn empty_result_is_a_no_data_error() {
        let source = FakeSource {
            records: vec![json!({})],
        };
        let err = collect(&source).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
