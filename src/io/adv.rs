//! SEC Form ADV bulk roster ingest.
//!
//! The FOIA roster export changes column names between releases, so column
//! resolution is best-effort: each logical field has an ordered candidate
//! list, matched exact-first then case-insensitive substring. A field whose
//! column cannot be found disables only the dependent filter or score
//! component, with a note surfaced to the console — never a hard failure.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::web::parse_money;
use crate::error::AppError;

/// One registered adviser, with only the fields scoring and output need.
#[derive(Debug, Clone, Default)]
pub struct AdvFirm {
    pub name: String,
    pub crd: String,
    pub state: String,
    pub city: String,
    pub website: String,
    pub org_form: String,
    pub aum: f64,
    pub formation_date: Option<NaiveDate>,
    pub last_filed: Option<NaiveDate>,
}

/// Ingest output: firms surviving the base filters, plus bookkeeping.
#[derive(Debug, Clone)]
pub struct AdvIngest {
    pub firms: Vec<AdvFirm>,
    pub rows_read: usize,
    /// Console notes about unresolved columns / skipped filters.
    pub notes: Vec<String>,
}

/// Candidate header names per logical field, across known export revisions.
const NAME_COLS: [&str; 4] = [
    "Primary Business Name",
    "Legal Name",
    "Firm Name",
    "Organization Name",
];
const CRD_COLS: [&str; 4] = [
    "Organization CRD#",
    "Primary Business CRD#",
    "CRD Number",
    "IA Firm CRD Number",
];
const STATE_COLS: [&str; 2] = ["Main Office State", "Primary Office State"];
const CITY_COLS: [&str; 2] = ["Main Office City", "Primary Office City"];
const COUNTRY_COLS: [&str; 2] = ["Main Office Country", "Country"];
const STATUS_COLS: [&str; 3] = ["SEC Current Status", "SEC Status", "Registration Status"];
const AUM_COLS: [&str; 4] = [
    "Total Gross Assets of Private Funds",
    "Total Regulatory Assets Under Management",
    "Regulatory AUM",
    "5F(2)(c)",
];
const FORMATION_COLS: [&str; 4] = [
    "1O",
    "Date of Formation",
    "Organization Date",
    "Formation Date",
];
const FILED_COLS: [&str; 3] = [
    "Latest ADV Filing Date",
    "Latest ADV Amendment Date",
    "Last Filing Date",
];
const ORG_FORM_COLS: [&str; 4] = [
    "3A",
    "Form of Organization",
    "Organization Type",
    "Legal Status",
];
const WEBSITE_COLS: [&str; 3] = ["Website Address", "Website", "Web Address"];

#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    name: Option<usize>,
    crd: Option<usize>,
    state: Option<usize>,
    city: Option<usize>,
    country: Option<usize>,
    status: Option<usize>,
    aum: Option<usize>,
    formation: Option<usize>,
    last_filed: Option<usize>,
    org_form: Option<usize>,
    website: Option<usize>,
}

/// Load the ADV roster from a local bulk CSV. An unreadable file is fatal.
pub fn load_adv_firms(path: &Path) -> Result<AdvIngest, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open ADV file '{}': {e}", path.display()))
    })?;
    read_adv_firms(file)
}

fn read_adv_firms<R: Read>(input: R) -> Result<AdvIngest, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read ADV headers: {e}")))?
        .clone();

    let (cols, notes) = resolve_columns(&headers);

    let mut firms = Vec::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            // One mangled row must not sink a 40k-row export.
            Err(_) => continue,
        };
        rows_read += 1;

        // Base filters: registered and US-based, when the columns exist.
        if let Some(status) = get(&record, cols.status) {
            if !status.to_ascii_lowercase().contains("active") {
                continue;
            }
        }
        if let Some(country) = get(&record, cols.country) {
            if !country.to_ascii_lowercase().contains("united states") {
                continue;
            }
        }

        let name = get(&record, cols.name).unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }

        firms.push(AdvFirm {
            name,
            crd: get(&record, cols.crd).unwrap_or_default().to_string(),
            state: get(&record, cols.state).unwrap_or_default().to_string(),
            city: get(&record, cols.city).unwrap_or_default().to_string(),
            website: get(&record, cols.website).unwrap_or_default().to_string(),
            org_form: get(&record, cols.org_form).unwrap_or_default().to_string(),
            aum: get(&record, cols.aum).map(parse_money).unwrap_or(0.0),
            formation_date: get(&record, cols.formation).and_then(parse_adv_date),
            last_filed: get(&record, cols.last_filed).and_then(parse_adv_date),
        });
    }

    Ok(AdvIngest {
        firms,
        rows_read,
        notes,
    })
}

fn resolve_columns(headers: &StringRecord) -> (ColumnMap, Vec<String>) {
    let mut notes = Vec::new();
    let mut resolve = |field: &str, candidates: &[&str], required_note: bool| -> Option<usize> {
        let found = find_column(headers, candidates);
        if found.is_none() && required_note {
            notes.push(format!(
                "column for '{field}' not found (tried {}); dependent filter/score skipped",
                candidates.join(", ")
            ));
        }
        found
    };

    let cols = ColumnMap {
        name: resolve("name", &NAME_COLS, true),
        crd: resolve("crd", &CRD_COLS, false),
        state: resolve("state", &STATE_COLS, false),
        city: resolve("city", &CITY_COLS, false),
        country: resolve("country", &COUNTRY_COLS, true),
        status: resolve("status", &STATUS_COLS, true),
        aum: resolve("aum", &AUM_COLS, true),
        formation: resolve("formation date", &FORMATION_COLS, true),
        last_filed: resolve("last filing date", &FILED_COLS, true),
        org_form: resolve("organization form", &ORG_FORM_COLS, true),
        website: resolve("website", &WEBSITE_COLS, false),
    };

    (cols, notes)
}

/// Find the first candidate header: exact match wins, then case-insensitive
/// substring.
fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = headers.iter().position(|h| h.trim() == *candidate) {
            return Some(idx);
        }
        let lowered = candidate.to_ascii_lowercase();
        if let Some(idx) = headers
            .iter()
            .position(|h| h.to_ascii_lowercase().contains(&lowered))
        {
            return Some(idx);
        }
    }
    None
}

fn get(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    record
        .get(idx?)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// SEC exports mix ISO and US date formats between releases.
fn parse_adv_date(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Primary Business Name,Organization CRD#,SEC Current Status,Main Office Country,Main Office State,Main Office City,Total Gross Assets of Private Funds,Latest ADV Filing Date,1O,3A,Website Address
Acme Wealth LLC,12345,Active,United States,NY,New York,\"$120,000,000\",01/15/2026,06/01/2001,Limited Liability Company,https://www.acmewealth.com
Gone Fishing Advisors,22222,Terminated,United States,FL,Miami,\"$90,000,000\",03/01/2020,01/01/1999,Corporation,
Offshore Partners,33333,Active,Cayman Islands,,George Town,\"$2,000,000,000\",02/01/2026,01/01/2005,Limited Partnership,
,44444,Active,United States,TX,Austin,\"$50,000,000\",01/01/2026,01/01/2010,LLC,
";

    #[test]
    fn ingest_applies_base_filters_and_drops_nameless() {
        let ingest = read_adv_firms(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ingest.rows_read, 4);
        assert_eq!(ingest.firms.len(), 1);

        let firm = &ingest.firms[0];
        assert_eq!(firm.name, "Acme Wealth LLC");
        assert_eq!(firm.crd, "12345");
        assert_eq!(firm.aum, 120_000_000.0);
        assert_eq!(firm.formation_date, NaiveDate::from_ymd_opt(2001, 6, 1));
        assert_eq!(firm.last_filed, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert!(ingest.notes.is_empty());
    }

    #[test]
    fn renamed_columns_resolve_by_substring() {
        let csv = "\
IA Firm Legal Name,Firm Registration Status,Main Office Country (US Only),Total Regulatory Assets Under Management ($)
Beta Capital,Active - SEC,United States,\"300,000,000\"
";
        // "Legal Name" and the others resolve via case-insensitive substring.
        let ingest = read_adv_firms(csv.as_bytes()).unwrap();
        assert_eq!(ingest.firms.len(), 1);
        assert_eq!(ingest.firms[0].name, "Beta Capital");
        assert_eq!(ingest.firms[0].aum, 300_000_000.0);
    }

    #[test]
    fn missing_columns_become_notes_not_errors() {
        let csv = "\
Primary Business Name,Main Office Country
Gamma Advisors,United States
";
        let ingest = read_adv_firms(csv.as_bytes()).unwrap();
        assert_eq!(ingest.firms.len(), 1);
        assert_eq!(ingest.firms[0].aum, 0.0);
        assert!(ingest.firms[0].formation_date.is_none());
        assert!(ingest.notes.iter().any(|n| n.contains("'aum'")));
        assert!(ingest.notes.iter().any(|n| n.contains("'status'")));
    }

    #[test]
    fn date_formats_across_releases() {
        assert_eq!(parse_adv_date("2026-01-15"), NaiveDate::from_ymd_opt(2026, 1, 15));
        assert_eq!(parse_adv_date("01/15/2026"), NaiveDate::from_ymd_opt(2026, 1, 15));
        assert_eq!(parse_adv_date("not a date"), None);
    }
}
