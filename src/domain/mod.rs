//! Shared domain types and small field-level helpers.

pub mod types;
pub mod web;

pub use types::{AdvLead, DemandLead, GrantSignal, SupplyLead, Volume};
