//! Read a previously exported lead CSV back in.
//!
//! Used by `leads clean` and `leads enrich`, which post-process the output of
//! `leads adv`. Malformed rows are reported and skipped rather than failing
//! the run; an unreadable file is fatal.

use std::fs::File;
use std::path::Path;

use crate::domain::AdvLead;
use crate::error::AppError;

pub fn read_adv_leads(path: &Path) -> Result<Vec<AdvLead>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open lead CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut leads = Vec::new();
    for (idx, result) in reader.deserialize::<AdvLead>().enumerate() {
        // Header is line 1, first record line 2.
        let line = idx + 2;
        match result {
            Ok(lead) => leads.push(lead),
            Err(e) => eprintln!("[leads] line {line}: {e} (skipped)"),
        }
    }

    if leads.is_empty() {
        return Err(AppError::new(
            3,
            format!("No usable rows in '{}'.", path.display()),
        ));
    }

    Ok(leads)
}
