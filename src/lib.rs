//! `lead-signals` library crate.
//!
//! The binary (`leads`) is a thin wrapper around this library so that:
//!
//! - the fetch/normalize/score pipelines are testable without spawning processes
//! - per-source adapters stay reusable as new data sources get added
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod io;
pub mod report;
pub mod score;
pub mod source;
