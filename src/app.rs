//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the selected source's fetch/normalize pipeline (or the local ADV one)
//! - prints summaries
//! - writes the output CSV

use clap::Parser;

use crate::cli::{AdvArgs, CleanArgs, Command, EnrichArgs, FinraArgs, NihArgs, NpiArgs, YcArgs};
use crate::domain::web::{clean_domain, derive_domain, is_social_domain};
use crate::domain::AdvLead;
use crate::enrich::{enrich_leads, AnymailClient};
use crate::error::AppError;
use crate::io::adv::load_adv_firms;
use crate::io::export::write_csv;
use crate::io::leads::read_adv_leads;
use crate::score::succession::{self, SuccessionFacts};
use crate::source::finra::FinraSource;
use crate::source::nih::NihSource;
use crate::source::npi::NpiSource;
use crate::source::yc::YcSource;

pub mod pipeline;

/// Entry point for the `leads` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Npi(args) => handle_npi(args),
        Command::Finra(args) => handle_finra(args),
        Command::Yc(args) => handle_yc(args),
        Command::Nih(args) => handle_nih(args),
        Command::Adv(args) => handle_adv(args),
        Command::Clean(args) => handle_clean(args),
        Command::Enrich(args) => handle_enrich(args),
    }
}

fn handle_npi(args: NpiArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("NPI Registry fetch"));
    println!(
        "Volume: {} ({} states), up to {} orgs/state\n",
        args.volume.display_name(),
        args.volume.states().len(),
        args.per_state
    );

    let source = NpiSource::new(args.volume.states(), args.per_state);
    let leads = pipeline::run_to_csv(&source, &args.output)?;

    println!(
        "\n{}",
        crate::report::format_demand_summary(&leads, &args.output.display().to_string())
    );
    Ok(())
}

fn handle_finra(args: FinraArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("FINRA BrokerCheck fetch"));
    println!(
        "Volume: {} ({} states), up to {} advisors/state\n",
        args.volume.display_name(),
        args.volume.states().len(),
        args.per_state
    );

    let source = FinraSource::new(args.volume.states(), args.per_state);
    let leads = pipeline::run_to_csv(&source, &args.output)?;

    println!(
        "\n{}",
        crate::report::format_demand_summary(&leads, &args.output.display().to_string())
    );
    Ok(())
}

fn handle_yc(args: YcArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("Y Combinator fetch"));

    let source = YcSource::new(args.industry, args.batch, args.limit);
    let leads = pipeline::run_to_csv(&source, &args.output)?;

    println!(
        "\n{}",
        crate::report::format_supply_summary(&leads, &args.output.display().to_string())
    );
    Ok(())
}

fn handle_nih(args: NihArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("NIH grant signals"));
    println!(
        "Window: last {} days, min award ${}, limit {}\n",
        args.days, args.min_amount, args.limit
    );

    let today = chrono::Local::now().date_naive();
    let source = NihSource::new(args.days, args.min_amount, args.limit, args.keywords, today);
    let mut signals = pipeline::collect(&source)?;

    // Strongest tiers first; within a tier, biggest awards first.
    signals.sort_by(|a, b| {
        tier_rank(&a.signal_tier)
            .cmp(&tier_rank(&b.signal_tier))
            .then_with(|| b.grant_amount.cmp(&a.grant_amount))
    });

    write_csv(&args.output, &signals)?;

    println!(
        "\n{}",
        crate::report::format_grant_summary(&signals, &args.output.display().to_string())
    );
    Ok(())
}

fn tier_rank(label: &str) -> u8 {
    match label {
        "A+" => 0,
        "A" => 1,
        "B" => 2,
        _ => 3,
    }
}

fn handle_adv(args: AdvArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("ADV succession signals"));

    let ingest = load_adv_firms(&args.input)?;
    for note in &ingest.notes {
        eprintln!("[adv] {note}");
    }

    let today = chrono::Local::now().date_naive();
    let mut leads: Vec<AdvLead> = Vec::new();

    for firm in &ingest.firms {
        let facts = SuccessionFacts {
            org_form: firm.org_form.clone(),
            formation_date: firm.formation_date,
            aum: firm.aum,
            last_filed: firm.last_filed,
        };
        let scored = succession::score(&facts, today);
        if scored.score < args.min_score {
            continue;
        }

        let domain = match clean_domain(&firm.website) {
            d if d.is_empty() => derive_domain(&firm.name),
            d => d,
        };

        leads.push(AdvLead {
            full_name: String::new(),
            company_name: firm.name.clone(),
            domain,
            email: String::new(),
            context: firm_context(&firm.city, &firm.state, firm.aum),
            signal: format!("Succession score {}: {}", scored.score, scored.reasons),
            score: scored.score,
            crd: firm.crd.clone(),
            state: firm.state.clone(),
            aum: firm.aum,
        });
    }

    if leads.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No firms scored {} or higher out of {} rows.",
                args.min_score, ingest.rows_read
            ),
        ));
    }

    leads.sort_by(|a, b| b.score.cmp(&a.score));
    write_csv(&args.output, &leads)?;

    println!(
        "\n{}",
        crate::report::format_succession_summary(
            &leads,
            ingest.rows_read,
            &args.output.display().to_string()
        )
    );
    Ok(())
}

/// One-line outreach context, e.g. "RIA in Austin, TX with $120M AUM".
fn firm_context(city: &str, state: &str, aum: f64) -> String {
    let location: Vec<&str> = [city, state].into_iter().filter(|s| !s.is_empty()).collect();
    let aum_m = aum / 1_000_000.0;
    if location.is_empty() {
        format!("RIA with ${aum_m:.0}M AUM")
    } else {
        format!("RIA in {} with ${aum_m:.0}M AUM", location.join(", "))
    }
}

fn handle_clean(args: CleanArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("clean lead domains"));

    let mut leads = read_adv_leads(&args.input)?;
    let mut repaired = 0usize;

    for lead in &mut leads {
        if lead.domain.is_empty() || is_social_domain(&lead.domain) {
            let derived = derive_domain(&lead.company_name);
            if !derived.is_empty() {
                println!("  {} -> {derived}", lead.company_name);
                lead.domain = derived;
                repaired += 1;
            }
        }
    }

    write_csv(&args.output, &leads)?;
    println!(
        "\nRepaired {repaired} of {} domains\nSaved to: {}",
        leads.len(),
        args.output.display()
    );
    Ok(())
}

fn handle_enrich(args: EnrichArgs) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header("email enrichment"));

    let client = AnymailClient::from_env()?;
    let mut leads = read_adv_leads(&args.input)?;
    let found = enrich_leads(&client, &mut leads);

    write_csv(&args.output, &leads)?;
    println!(
        "\nFound {found} emails for {} leads\nSaved to: {}",
        leads.len(),
        args.output.display()
    );
    Ok(())
}
