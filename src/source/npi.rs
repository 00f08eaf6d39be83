//! NPI Registry (US government healthcare provider directory).
//!
//! Free, no auth. One GET per page per state; the registry caps `limit` at 200
//! and pages via `skip`.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::domain::DemandLead;
use crate::error::AppError;
use crate::source::{first_of, rate_limit, str_or_empty, truncate_chars, Source};

const BASE_URL: &str = "https://npiregistry.cms.hhs.gov/api/";
const PAGE_LIMIT: usize = 200;
const SLEEP_MS: u64 = 300;

pub struct NpiSource {
    client: Client,
    states: Vec<String>,
    per_state: usize,
}

impl NpiSource {
    pub fn new(states: &[&str], per_state: usize) -> Self {
        Self {
            client: Client::new(),
            states: states.iter().map(|s| s.to_string()).collect(),
            per_state,
        }
    }

    fn fetch_state(&self, state: &str) -> Result<Vec<Value>, AppError> {
        let mut out = Vec::new();
        let mut skip = 0usize;

        while out.len() < self.per_state {
            let page = (self.per_state - out.len()).min(PAGE_LIMIT);
            let resp = self
                .client
                .get(BASE_URL)
                .query(&[
                    ("version", "2.1"),
                    ("state", state),
                    ("limit", &page.to_string()),
                    ("skip", &skip.to_string()),
                ])
                .send()
                .map_err(|e| AppError::new(4, format!("NPI request failed: {e}")))?;

            if !resp.status().is_success() {
                return Err(AppError::new(
                    4,
                    format!("NPI request failed with status {}.", resp.status()),
                ));
            }

            let body: Value = resp
                .json()
                .map_err(|e| AppError::new(4, format!("Failed to parse NPI response: {e}")))?;

            let results = body
                .get("results")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if results.is_empty() {
                break;
            }

            skip += results.len();
            out.extend(results);
            rate_limit(SLEEP_MS);
        }

        Ok(out)
    }
}

impl Source for NpiSource {
    type Lead = DemandLead;

    fn name(&self) -> &'static str {
        "npi"
    }

    fn fetch(&self) -> Result<Vec<Value>, AppError> {
        let mut all = Vec::new();
        for state in &self.states {
            // Skip-and-continue: one failing state must not sink the run.
            match self.fetch_state(state) {
                Ok(records) => {
                    eprintln!("[npi] {state}: {} records", records.len());
                    all.extend(records);
                }
                Err(e) => eprintln!("[npi] {state}: {e} (skipped)"),
            }
        }
        Ok(all)
    }

    fn normalize(&self, raw: &Value) -> Option<DemandLead> {
        let org_name = str_or_empty(raw, &["basic.organization_name", "organization_name"]);
        let first = str_or_empty(raw, &["basic.first_name", "first_name"]);
        let last = str_or_empty(raw, &["basic.last_name", "last_name"]);

        let specialty = first_of(raw, "taxonomies")
            .and_then(|t| t.get("desc"))
            .and_then(Value::as_str)
            .unwrap_or("Healthcare Provider")
            .to_string();

        let address = first_of(raw, "addresses");
        let city = address
            .map(|a| str_or_empty(a, &["city"]))
            .unwrap_or_default();
        let state = address
            .map(|a| str_or_empty(a, &["state"]))
            .unwrap_or_default();

        let (company, full_name) = if !org_name.is_empty() {
            (org_name, String::new())
        } else {
            let person = format!("{first} {last}").trim().to_string();
            (format!("{person} Practice"), person)
        };

        // An individual record with no name yields " Practice" — drop it.
        if company.is_empty() || company == " Practice" || company == "Practice" {
            return None;
        }

        Some(DemandLead {
            company,
            domain: String::new(),
            signal: format!("Healthcare Provider - {}", truncate_chars(&specialty, 40)),
            industry: "Healthcare".to_string(),
            full_name,
            title: specialty,
            city,
            state,
        })
    }
}
