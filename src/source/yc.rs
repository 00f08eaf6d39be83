//! Y Combinator company directory (public Algolia index).
//!
//! Free, no auth beyond the directory's published client-side search key.
//! POST queries page via `page`; `hitsPerPage` is capped at 1000 upstream.

use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::domain::web::clean_domain;
use crate::domain::SupplyLead;
use crate::error::AppError;
use crate::source::{rate_limit, str_or_empty, truncate_chars, Source};

const BASE_URL: &str = "https://45bwzj1sgc-dsn.algolia.net/1/indexes/YCCompany_production/query";
const APP_ID: &str = "45BWZJ1SGC";
// Public search-only key shipped with the YC directory frontend.
const API_KEY: &str = "NDYzYmNmMTRjYzU4MDE0ZWY0MTU2OTUyNmM4OGZjMTQwMWIzNTRhMWU0MTQ3Y2M2Zjg5OGI1MmMwZjRjNjMxMGF0dHJpYnV0ZXNUb1JldHJpZXZlPSU1QiUyMm5hbWUlMjIlMkMlMjJzbHVnJTIyJTJDJTIyb25lX2xpbmVyJTIyJTJDJTIyd2Vic2l0ZSUyMiUyQyUyMnNtYWxsX2xvZ29fdXJsJTIyJTJDJTIyYmF0Y2glMjIlMkMlMjJpbmR1c3RyaWVzJTIyJTJDJTIyc3RhdHVzJTIyJTJDJTIydGVhbV9zaXplJTIyJTJDJTIybG9uZ19kZXNjcmlwdGlvbiUyMiU1RCZoaWdobGlnaHRQb3N0VGFnPV9fJTJGYWlzLWhpZ2hsaWdodF9fJmhpZ2hsaWdodFByZVRhZz1fX2Fpcy1oaWdobGlnaHRfXw==";
const SLEEP_MS: u64 = 300;

pub struct YcSource {
    client: Client,
    industry: Option<String>,
    batch: Option<String>,
    limit: usize,
}

impl YcSource {
    pub fn new(industry: Option<String>, batch: Option<String>, limit: usize) -> Self {
        Self {
            client: Client::new(),
            industry,
            batch,
            limit,
        }
    }

    fn filters(&self) -> String {
        let mut parts = Vec::new();
        if let Some(batch) = &self.batch {
            parts.push(format!("batch:{batch}"));
        }
        if let Some(industry) = &self.industry {
            parts.push(format!("industries:{industry}"));
        }
        parts.join(" AND ")
    }

    fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<Value>, AppError> {
        let body = json!({
            "query": "",
            "hitsPerPage": per_page,
            "page": page,
            "filters": self.filters(),
        });

        let resp = self
            .client
            .post(BASE_URL)
            .header("x-algolia-application-id", APP_ID)
            .header("x-algolia-api-key", API_KEY)
            .json(&body)
            .send()
            .map_err(|e| AppError::new(4, format!("YC directory request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("YC directory request failed with status {}.", resp.status()),
            ));
        }

        let body: Value = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse YC directory response: {e}")))?;

        Ok(body
            .get("hits")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

impl Source for YcSource {
    type Lead = SupplyLead;

    fn name(&self) -> &'static str {
        "yc"
    }

    fn fetch(&self) -> Result<Vec<Value>, AppError> {
        let per_page = self.limit.min(1000);
        let mut all = Vec::new();
        let mut page = 0usize;

        while all.len() < self.limit {
            match self.fetch_page(page, per_page) {
                Ok(hits) => {
                    if hits.is_empty() {
                        break;
                    }
                    eprintln!("[yc] page {page}: {} companies", hits.len());
                    all.extend(hits);
                }
                Err(e) => {
                    eprintln!("[yc] page {page}: {e} (stopping)");
                    break;
                }
            }
            page += 1;
            rate_limit(SLEEP_MS);
        }

        all.truncate(self.limit);
        Ok(all)
    }

    fn normalize(&self, raw: &Value) -> Option<SupplyLead> {
        let company = str_or_empty(raw, &["name"]);
        if company.is_empty() {
            return None;
        }

        let one_liner = str_or_empty(raw, &["one_liner"]);
        let industry = raw
            .get("industries")
            .and_then(Value::as_array)
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .unwrap_or("Technology")
            .to_string();

        let batch = str_or_empty(raw, &["batch"]);
        let status = raw
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("Active");

        Some(SupplyLead {
            company,
            domain: clean_domain(&str_or_empty(raw, &["website"])),
            description: one_liner.clone(),
            capability: truncate_chars(&one_liner, 100),
            industry,
            signal: format!("YC {batch} - {status}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> YcSource {
        YcSource::new(Some("Healthcare".to_string()), None, 10)
    }

    #[test]
    fn company_hit_normalizes() {
        let raw = json!({
            "name": "Medplumb",
            "website": "https://www.medplumb.com/",
            "one_liner": "Plumbing for health data",
            "industries": ["Healthcare", "B2B"],
            "batch": "W24",
            "status": "Active",
        });

        let lead = source().normalize(&raw).unwrap();
        assert_eq!(lead.company, "Medplumb");
        assert_eq!(lead.domain, "medplumb.com");
        assert_eq!(lead.description, "Plumbing for health data");
        assert_eq!(lead.industry, "Healthcare");
        assert_eq!(lead.signal, "YC W24 - Active");
    }

    #[test]
    fn missing_fields_default_not_omitted() {
        let raw = json!({"name": "Stealth Co"});
        let lead = source().normalize(&raw).unwrap();
        assert_eq!(lead.domain, "");
        assert_eq!(lead.description, "");
        assert_eq!(lead.industry, "Technology");
        assert_eq!(lead.signal, "YC  - Active");
    }

    #[test]
    fn nameless_hit_is_dropped() {
        assert!(source().normalize(&json!({"one_liner": "???"})).is_none());
    }

    #[test]
    fn filters_join_batch_and_industry() {
        let s = YcSource::new(Some("Fintech".to_string()), Some("S24".to_string()), 5);
        assert_eq!(s.filters(), "batch:S24 AND industries:Fintech");
        assert_eq!(YcSource::new(None, None, 5).filters(), "");
    }
}
