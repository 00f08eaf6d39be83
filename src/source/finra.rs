//! FINRA BrokerCheck search API (licensed financial advisors).
//!
//! Free, no auth. Solr-style search endpoint: `nrows` is capped at 100, pages
//! via `start`. Hits live under `hits.hits[]._source`.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::domain::DemandLead;
use crate::error::AppError;
use crate::source::{first_of, rate_limit, str_or_empty, Source};

const BASE_URL: &str = "https://api.brokercheck.finra.org/search/individual";
const PAGE_LIMIT: usize = 100;
const SLEEP_MS: u64 = 500;

pub struct FinraSource {
    client: Client,
    states: Vec<String>,
    per_state: usize,
}

impl FinraSource {
    pub fn new(states: &[&str], per_state: usize) -> Self {
        Self {
            client: Client::new(),
            states: states.iter().map(|s| s.to_string()).collect(),
            per_state,
        }
    }

    fn fetch_state(&self, state: &str) -> Result<Vec<Value>, AppError> {
        let filter =
            format!("currentEmployments.scope:Active,currentEmployments.branchState:{state}");
        let mut out = Vec::new();
        let mut start = 0usize;

        while out.len() < self.per_state {
            let page = (self.per_state - out.len()).min(PAGE_LIMIT);
            let resp = self
                .client
                .get(BASE_URL)
                .query(&[
                    ("query", ""),
                    ("filter", filter.as_str()),
                    ("hl", "true"),
                    ("nrows", &page.to_string()),
                    ("start", &start.to_string()),
                    ("sort", "score+desc"),
                    ("wt", "json"),
                ])
                .send()
                .map_err(|e| AppError::new(4, format!("BrokerCheck request failed: {e}")))?;

            if !resp.status().is_success() {
                return Err(AppError::new(
                    4,
                    format!("BrokerCheck request failed with status {}.", resp.status()),
                ));
            }

            let body: Value = resp.json().map_err(|e| {
                AppError::new(4, format!("Failed to parse BrokerCheck response: {e}"))
            })?;

            let hits = body
                .get("hits")
                .and_then(|h| h.get("hits"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if hits.is_empty() {
                break;
            }

            start += hits.len();
            out.extend(hits);
            rate_limit(SLEEP_MS);
        }

        Ok(out)
    }
}

impl Source for FinraSource {
    type Lead = DemandLead;

    fn name(&self) -> &'static str {
        "finra"
    }

    fn fetch(&self) -> Result<Vec<Value>, AppError> {
        let mut all = Vec::new();
        for state in &self.states {
            match self.fetch_state(state) {
                Ok(records) => {
                    eprintln!("[finra] {state}: {} records", records.len());
                    all.extend(records);
                }
                Err(e) => eprintln!("[finra] {state}: {e} (skipped)"),
            }
        }
        Ok(all)
    }

    fn normalize(&self, raw: &Value) -> Option<DemandLead> {
        let source = raw.get("_source").unwrap_or(raw);
        let employment = first_of(source, "currentEmployments");

        let company = employment
            .map(|e| str_or_empty(e, &["firmName"]))
            .unwrap_or_default();
        if company.is_empty() {
            return None;
        }

        let first = str_or_empty(source, &["firstName"]);
        let last = str_or_empty(source, &["lastName"]);
        let city = employment
            .map(|e| str_or_empty(e, &["branchCity"]))
            .unwrap_or_default();
        let state = employment
            .map(|e| str_or_empty(e, &["branchState"]))
            .unwrap_or_default();

        Some(DemandLead {
            company,
            domain: String::new(),
            signal: format!("FINRA Licensed - {city}, {state}"),
            industry: "Financial Services".to_string(),
            full_name: format!("{first} {last}").trim().to_string(),
            title: "Financial Advisor".to_string(),
            city,
            state,
        })
    }
}
