//! NIH Reporter projects search (grant awards).
//!
//! Free, no auth. POST search with JSON criteria; pages via `offset`, 500
//! records max per page. Each grant is flattened into a [`GrantSignal`] with
//! score, tier, signal type and outsource likelihood attached.

use chrono::{Duration, NaiveDate};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::domain::GrantSignal;
use crate::error::AppError;
use crate::score::grant::{self, GrantFacts};
use crate::source::{first_of, pluck, rate_limit, str_or_empty, truncate_chars, Source};

const BASE_URL: &str = "https://api.reporter.nih.gov/v2/projects/search";
const PAGE_LIMIT: usize = 500;
const SLEEP_MS: u64 = 1000;
const MAX_AMOUNT: u64 = 100_000_000;

/// Default search keywords when none are supplied.
const BIOTECH_KEYWORDS: [&str; 10] = [
    "oncology",
    "cancer",
    "tumor",
    "gene therapy",
    "cell therapy",
    "immunotherapy",
    "rare disease",
    "vaccine",
    "neurodegeneration",
    "drug discovery",
];

pub struct NihSource {
    client: Client,
    days_back: i64,
    min_amount: u64,
    limit: usize,
    keywords: Vec<String>,
    today: NaiveDate,
}

impl NihSource {
    pub fn new(
        days_back: i64,
        min_amount: u64,
        limit: usize,
        keywords: Vec<String>,
        today: NaiveDate,
    ) -> Self {
        let keywords = if keywords.is_empty() {
            BIOTECH_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            keywords
        };
        Self {
            client: Client::new(),
            days_back,
            min_amount,
            limit,
            keywords,
            today,
        }
    }

    fn query(&self, offset: usize, limit: usize) -> Value {
        let from_date = self.today - Duration::days(self.days_back);
        // The API scores an OR query; five terms is plenty of recall.
        let search_text = self
            .keywords
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        json!({
            "criteria": {
                "award_amount_range": {
                    "min_amount": self.min_amount,
                    "max_amount": MAX_AMOUNT,
                },
                "project_start_date": {
                    "from_date": from_date.format("%Y-%m-%d").to_string(),
                    "to_date": self.today.format("%Y-%m-%d").to_string(),
                },
                "advanced_text_search": {
                    "operator": "or",
                    "search_field": "all",
                    "search_text": search_text,
                },
            },
            "offset": offset,
            "limit": limit,
            "sort_field": "award_amount",
            "sort_order": "desc",
        })
    }

    fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<Value>, AppError> {
        let resp = self
            .client
            .post(BASE_URL)
            .json(&self.query(offset, limit))
            .send()
            .map_err(|e| AppError::new(4, format!("NIH Reporter request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("NIH Reporter request failed with status {}.", resp.status()),
            ));
        }

        let body: Value = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse NIH Reporter response: {e}")))?;

        Ok(body
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    fn facts(&self, raw: &Value) -> GrantFacts {
        GrantFacts {
            amount: pluck(raw, "award_amount").and_then(Value::as_u64).unwrap_or(0),
            start_date: parse_api_date(&str_or_empty(raw, &["project_start_date"])),
            end_date: parse_api_date(&str_or_empty(raw, &["project_end_date"])),
            activity_code: str_or_empty(raw, &["activity_code"]),
            is_active: pluck(raw, "is_active").and_then(Value::as_bool).unwrap_or(false),
            is_new: pluck(raw, "is_new").and_then(Value::as_bool).unwrap_or(false),
            org_type: str_or_empty(raw, &["organization_type.name"]),
        }
    }
}

impl Source for NihSource {
    type Lead = GrantSignal;

    fn name(&self) -> &'static str {
        "nih"
    }

    fn fetch(&self) -> Result<Vec<Value>, AppError> {
        let mut all = Vec::new();
        let mut offset = 0usize;

        while all.len() < self.limit {
            let page = (self.limit - all.len()).min(PAGE_LIMIT);
            match self.fetch_page(offset, page) {
                Ok(results) => {
                    if results.is_empty() {
                        break;
                    }
                    offset += results.len();
                    all.extend(results);
                    eprintln!("[nih] fetched {} grants", all.len());
                }
                Err(e) => {
                    eprintln!("[nih] {e} (stopping)");
                    break;
                }
            }
            rate_limit(SLEEP_MS);
        }

        Ok(all)
    }

    fn normalize(&self, raw: &Value) -> Option<GrantSignal> {
        let org_name = str_or_empty(raw, &["organization.org_name", "org_name"]);
        if org_name.is_empty() {
            return None;
        }

        let pis = pluck(raw, "principal_investigators")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let pi_name = first_of(raw, "principal_investigators")
            .map(|pi| str_or_empty(pi, &["full_name"]))
            .unwrap_or_default();
        let all_pis = pis
            .iter()
            .filter_map(|pi| pi.get("full_name").and_then(Value::as_str))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        let institute = str_or_empty(raw, &["agency_ic_admin.abbreviation"]);

        let facts = self.facts(raw);
        let (signal_score, tier) = grant::score(&facts, self.today);
        let signal_type = grant::signal_type(&facts, self.today);
        let outsource = grant::outsource_likelihood(&facts);

        let abstract_raw = str_or_empty(raw, &["abstract_text"]);
        let abstract_text = truncate_chars(&abstract_raw, 500).replace(['\n', '\r'], " ");

        let fiscal_year = match pluck(raw, "fiscal_year") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Some(GrantSignal {
            org_name,
            org_city: str_or_empty(raw, &["organization.org_city"]),
            org_state: str_or_empty(raw, &["organization.org_state"]),
            org_country: str_or_empty(raw, &["organization.org_country"]),
            org_type: facts.org_type.clone(),

            pi_name: pi_name.trim().to_string(),
            all_pis,
            pi_count: pis.len(),

            grant_amount: facts.amount,
            start_date: truncate_chars(&str_or_empty(raw, &["project_start_date"]), 10),
            end_date: truncate_chars(&str_or_empty(raw, &["project_end_date"]), 10),
            project_title: truncate_chars(&str_or_empty(raw, &["project_title"]), 200),
            activity_code: facts.activity_code.clone(),
            fiscal_year,
            project_number: str_or_empty(raw, &["project_num"]),

            therapeutic_area: therapeutic_area(&institute).to_string(),
            nih_institute: institute,

            is_active: yes_no(facts.is_active),
            is_new_grant: yes_no(facts.is_new),
            project_url: str_or_empty(raw, &["project_detail_url"]),

            signal_type,
            signal_score,
            signal_tier: tier.label().to_string(),
            outsource_likelihood: outsource.label().to_string(),

            abstract_text,
        })
    }
}

fn yes_no(v: bool) -> String {
    if v { "Yes" } else { "No" }.to_string()
}

/// NIH Reporter dates come back as `YYYY-MM-DDThh:mm:ssZ`; the date prefix is
/// all we need.
fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// NIH administering institute -> therapeutic area, for CRO matching.
fn therapeutic_area(institute: &str) -> &'static str {
    match institute {
        "NCI" => "Oncology",
        "NIAID" => "Infectious Disease / Immunology",
        "NHLBI" => "Cardiovascular",
        "NINDS" => "Neurology",
        "NIA" => "Aging / Neurodegeneration",
        "NIDDK" => "Metabolic / Diabetes",
        "NIMH" => "Mental Health / CNS",
        "NICHD" => "Pediatrics / Reproductive",
        "NIEHS" => "Environmental Health",
        "NIDA" => "Addiction",
        "NIAAA" => "Alcohol Research",
        "NIGMS" => "General Medical Sciences",
        "NCATS" => "Translational Sciences",
        "NLM" => "Library / Informatics",
        "NHGRI" => "Genomics",
        "NIBIB" => "Biomedical Imaging",
        "NCCIH" => "Complementary Medicine",
        "NIDCD" => "Hearing / Communication",
        "NIDCR" => "Dental / Craniofacial",
        "NEI" => "Ophthalmology",
        "NIAMS" => "Musculoskeletal",
        "NIMHD" => "Health Disparities",
        "NINR" => "Nursing Research",
        _ => "",
    }
}
