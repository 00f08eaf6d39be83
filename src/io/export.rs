//! CSV export.
//!
//! The header row comes from the record struct's field order, so the output
//! column set is fixed per record type regardless of how complete any given
//! source record was. Existing files at the path are overwritten.

use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Write records to a CSV file. Returns the number of rows written.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize, AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output CSV '{}': {e}", path.display()),
        )
    })?;

    write_rows(&mut writer, rows)
        .map_err(|e| AppError::new(2, format!("Failed to write output CSV: {e}")))?;

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush output CSV: {e}")))?;

    Ok(rows.len())
}

fn write_rows<T: Serialize, W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    rows: &[T],
) -> Result<(), csv::Error> {
    for row in rows {
        writer.serialize(row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdvLead, DemandLead, SupplyLead};

    fn to_csv_string<T: Serialize>(rows: &[T]) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_rows(&mut writer, rows).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn demand_header_is_fixed_and_ordered() {
        let out = to_csv_string(&[DemandLead::default()]);
        let header = out.lines().next().unwrap();
        assert_eq!(header, "company,domain,signal,industry,fullName,title,city,state");
    }

    #[test]
    fn supply_header_is_fixed_and_ordered() {
        let out = to_csv_string(&[SupplyLead::default()]);
        let header = out.lines().next().unwrap();
        assert_eq!(header, "company,domain,description,capability,industry,signal");
    }

    #[test]
    fn adv_header_matches_outreach_template() {
        let out = to_csv_string(&[AdvLead::default()]);
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "Full Name,Company Name,Domain,Email,Context,Signal,_Score,_CRD,_State,_AUM"
        );
    }

    #[test]
    fn incomplete_records_still_fill_every_column() {
        let lead = DemandLead {
            company: "Acme".to_string(),
            ..DemandLead::default()
        };
        let out = to_csv_string(&[lead]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "Acme,,,,,,,");
    }
}
