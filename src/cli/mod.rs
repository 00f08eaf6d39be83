//! Command-line parsing for the lead-signal fetchers.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetch/score code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Volume;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "leads", version, about = "Lead-signal fetchers for public registries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands, one per data source plus the ADV post-processing steps.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch healthcare organizations from the NPI Registry.
    Npi(NpiArgs),
    /// Fetch licensed advisors from FINRA BrokerCheck.
    Finra(FinraArgs),
    /// Fetch Y Combinator companies via the public Algolia index.
    Yc(YcArgs),
    /// Fetch and score recent NIH grant awards.
    Nih(NihArgs),
    /// Score a local SEC Form ADV bulk CSV for succession signals.
    Adv(AdvArgs),
    /// Repair bad/social-media domains in an exported lead CSV.
    Clean(CleanArgs),
    /// Find contact emails for an exported lead CSV (needs ANYMAIL_API_KEY).
    Enrich(EnrichArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct NpiArgs {
    /// How many states to cover.
    #[arg(short = 'v', long, value_enum, default_value_t = Volume::Low)]
    pub volume: Volume,

    /// Max organizations per state.
    #[arg(long, default_value_t = 200)]
    pub per_state: usize,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "demand_healthcare.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct FinraArgs {
    /// How many states to cover.
    #[arg(short = 'v', long, value_enum, default_value_t = Volume::Low)]
    pub volume: Volume,

    /// Max advisors per state.
    #[arg(long, default_value_t = 100)]
    pub per_state: usize,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "demand_financial.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct YcArgs {
    /// Restrict to one industry (e.g. "Healthcare").
    #[arg(long)]
    pub industry: Option<String>,

    /// Restrict to one batch (e.g. "W24").
    #[arg(long)]
    pub batch: Option<String>,

    /// Max companies to fetch.
    #[arg(long, default_value_t = 200)]
    pub limit: usize,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "supply_startups.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct NihArgs {
    /// Look-back window for project start dates, in days.
    #[arg(long, default_value_t = 90)]
    pub days: i64,

    /// Minimum award amount in dollars.
    #[arg(long, default_value_t = 500_000)]
    pub min_amount: u64,

    /// Max grants to fetch.
    #[arg(long, default_value_t = 600)]
    pub limit: usize,

    /// Abstract search keywords (repeatable). Defaults to a biotech set.
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "nih_grant_signals.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct AdvArgs {
    /// Path to the SEC Form ADV bulk CSV.
    pub input: PathBuf,

    /// Minimum succession score to keep a firm.
    #[arg(long, default_value_t = 40)]
    pub min_score: u32,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "rias_succession_signals.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct CleanArgs {
    /// Previously exported lead CSV.
    pub input: PathBuf,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "leads_cleaned.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct EnrichArgs {
    /// Previously exported lead CSV.
    pub input: PathBuf,

    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "leads_enriched.csv")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npi_defaults() {
        let cli = Cli::parse_from(["leads", "npi"]);
        match cli.command {
            Command::Npi(args) => {
                assert_eq!(args.volume, Volume::Low);
                assert_eq!(args.per_state, 200);
                assert_eq!(args.output.to_str(), Some("demand_healthcare.csv"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn nih_accepts_repeated_keywords() {
        let cli = Cli::parse_from(["leads", "nih", "-k", "oncology", "-k", "gene therapy"]);
        match cli.command {
            Command::Nih(args) => {
                assert_eq!(args.keywords, vec!["oncology", "gene therapy"]);
                assert_eq!(args.days, 90);
                assert_eq!(args.min_amount, 500_000);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn adv_requires_input_path() {
        assert!(Cli::try_parse_from(["leads", "adv"]).is_err());
        let cli = Cli::parse_from(["leads", "adv", "ia_firms.csv", "--min-score", "55"]);
        match cli.command {
            Command::Adv(args) => {
                assert_eq!(args.input.to_str(), Some("ia_firms.csv"));
                assert_eq!(args.min_score, 55);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
