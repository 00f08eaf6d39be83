//! Lead record schemas and run-level presets.
//!
//! The column sets here are fixed output contracts: every CSV row carries the
//! full set in declaration order, with empty strings standing in for fields the
//! source record did not provide. Serialization order is field order, so the
//! structs double as the schema definition.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How many states a demand fetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    /// ~4 states, fast.
    Low,
    /// ~10 states.
    Medium,
    /// ~20 states, takes longer.
    High,
}

impl Volume {
    /// State codes covered at this volume level.
    pub fn states(self) -> &'static [&'static str] {
        match self {
            Volume::Low => &["CA", "TX", "NY", "FL"],
            Volume::Medium => &["CA", "TX", "NY", "FL", "IL", "PA", "OH", "GA", "NC", "MI"],
            Volume::High => &[
                "CA", "TX", "NY", "FL", "IL", "PA", "OH", "GA", "NC", "MI", "NJ", "VA", "WA",
                "AZ", "MA", "TN", "IN", "MO", "MD", "WI",
            ],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Volume::Low => "low",
            Volume::Medium => "medium",
            Volume::High => "high",
        }
    }
}

/// A demand-side lead: an organization that buys services.
///
/// Columns: `company, domain, signal, industry, fullName, title, city, state`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemandLead {
    pub company: String,
    pub domain: String,
    pub signal: String,
    pub industry: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub title: String,
    pub city: String,
    pub state: String,
}

/// A supply-side lead: a company that sells into the demand side.
///
/// Columns: `company, domain, description, capability, industry, signal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplyLead {
    pub company: String,
    pub domain: String,
    pub description: String,
    pub capability: String,
    pub industry: String,
    pub signal: String,
}

/// A scored NIH grant signal.
///
/// One row per awarded grant, flattened from the NIH Reporter record plus the
/// computed score/tier columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantSignal {
    pub org_name: String,
    pub org_city: String,
    pub org_state: String,
    pub org_country: String,
    pub org_type: String,

    pub pi_name: String,
    pub all_pis: String,
    pub pi_count: usize,

    pub grant_amount: u64,
    pub start_date: String,
    pub end_date: String,
    pub project_title: String,
    pub activity_code: String,
    pub fiscal_year: String,
    pub project_number: String,

    pub nih_institute: String,
    pub therapeutic_area: String,

    pub is_active: String,
    pub is_new_grant: String,
    pub project_url: String,

    pub signal_type: String,
    pub signal_score: u32,
    pub signal_tier: String,
    pub outsource_likelihood: String,

    pub abstract_text: String,
}

/// A succession-scored RIA lead, as written by `leads adv` and read back by
/// `leads clean` / `leads enrich`.
///
/// Underscore-prefixed columns are reference fields, not outreach fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvLead {
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Context")]
    pub context: String,
    #[serde(rename = "Signal")]
    pub signal: String,
    #[serde(rename = "_Score")]
    pub score: u32,
    #[serde(rename = "_CRD")]
    pub crd: String,
    #[serde(rename = "_State")]
    pub state: String,
    #[serde(rename = "_AUM")]
    pub aum: f64,
}
