//! Contact email enrichment via the Anymail Finder company search.
//!
//! Enrichment is best-effort: a failed lookup leaves the lead's email empty
//! and the pass continues. Only a missing API key is fatal, since without it
//! no lookup can succeed.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::domain::web::is_social_domain;
use crate::domain::AdvLead;
use crate::error::AppError;

const COMPANY_SEARCH_URL: &str = "https://api.anymailfinder.com/v5.0/search/company.json";
const SLEEP_MS: u64 = 500;

pub struct AnymailClient {
    client: Client,
    api_key: String,
}

impl AnymailClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("ANYMAIL_API_KEY")
            .map_err(|_| AppError::new(2, "Missing ANYMAIL_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Look up a generic contact email for a domain. `None` means the
    /// service had nothing for this domain.
    pub fn company_email(&self, domain: &str) -> Result<Option<String>, AppError> {
        let response = self
            .client
            .post(COMPANY_SEARCH_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({ "domain": domain }))
            .send()
            .map_err(|e| AppError::new(4, format!("Anymail request failed: {e}")))?;

        if !response.status().is_success() {
            // Unknown domain, quota exhausted, etc. Not worth failing over.
            return Ok(None);
        }

        let body: Value = response
            .json()
            .map_err(|e| AppError::new(4, format!("Anymail response was not JSON: {e}")))?;

        let email = body
            .get("emails")
            .and_then(Value::as_array)
            .and_then(|emails| emails.first())
            .and_then(|first| first.get("email"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(email)
    }
}

/// Fill in empty `Email` fields in place. Returns how many emails were found.
///
/// Leads without a usable domain (empty or social-media) are left untouched;
/// individual lookup failures are reported and skipped.
pub fn enrich_leads(client: &AnymailClient, leads: &mut [AdvLead]) -> usize {
    let total = leads.len();
    let mut found = 0usize;

    for (i, lead) in leads.iter_mut().enumerate() {
        if !lead.email.is_empty() {
            continue;
        }
        if lead.domain.is_empty() || is_social_domain(&lead.domain) {
            continue;
        }

        match client.company_email(&lead.domain) {
            Ok(Some(email)) => {
                println!(
                    "  [{}/{}] {} ({}) -> {}",
                    i + 1,
                    total,
                    lead.company_name,
                    lead.domain,
                    email
                );
                lead.email = email;
                found += 1;
            }
            Ok(None) => {
                println!(
                    "  [{}/{}] {} ({}) -> (no email found)",
                    i + 1,
                    total,
                    lead.company_name,
                    lead.domain
                );
            }
            Err(e) => eprintln!("  [{}/{}] {}: {e} (skipped)", i + 1, total, lead.domain),
        }

        thread::sleep(Duration::from_millis(SLEEP_MS));
    }

    found
}
