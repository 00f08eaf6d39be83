//! Formatted terminal summaries.
//!
//! We keep formatting code in one place so:
//! - the fetch/score code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::collections::BTreeMap;

use crate::domain::{AdvLead, DemandLead, GrantSignal, SupplyLead};

/// Banner printed at the start of every run.
pub fn format_run_header(command: &str) -> String {
    format!("=== leads - {command} ===\n")
}

/// Summary for a demand-side fetch (NPI, FINRA).
pub fn format_demand_summary(leads: &[DemandLead], output: &str) -> String {
    let mut by_state: BTreeMap<&str, usize> = BTreeMap::new();
    for lead in leads {
        *by_state.entry(lead.state.as_str()).or_default() += 1;
    }

    let mut out = String::new();
    out.push_str(&format!("Leads: {}\n", leads.len()));
    out.push_str("By state:\n");
    for (state, count) in &by_state {
        let label = if state.is_empty() { "(none)" } else { state };
        out.push_str(&format!("  {label:>6}: {count}\n"));
    }
    out.push_str(&format!("Saved to: {output}\n"));
    out
}

/// Summary for a supply-side fetch (YC).
pub fn format_supply_summary(leads: &[SupplyLead], output: &str) -> String {
    let with_domain = leads.iter().filter(|l| !l.domain.is_empty()).count();

    let mut out = String::new();
    out.push_str(&format!("Companies: {}\n", leads.len()));
    out.push_str(&format!("With domain: {with_domain}\n"));
    out.push_str(&format!("Saved to: {output}\n"));
    out
}

/// Summary for an NIH grant-signal run: tier distribution, funding totals,
/// and the most common therapeutic areas.
pub fn format_grant_summary(signals: &[GrantSignal], output: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Grant signals: {}\n", signals.len()));

    out.push_str("\nBy tier:\n");
    for tier in ["A+", "A", "B", "C"] {
        let count = signals.iter().filter(|s| s.signal_tier == tier).count();
        out.push_str(&format!("  {tier:>2}: {count}\n"));
    }

    let total_funding: u64 = signals.iter().map(|s| s.grant_amount).sum();
    out.push_str(&format!(
        "\nTotal funding: ${:.1}M\n",
        total_funding as f64 / 1_000_000.0
    ));

    let high_outsource = signals
        .iter()
        .filter(|s| s.outsource_likelihood == "HIGH")
        .count();
    out.push_str(&format!("High outsource likelihood: {high_outsource}\n"));

    let mut areas: BTreeMap<&str, usize> = BTreeMap::new();
    for signal in signals {
        if !signal.therapeutic_area.is_empty() {
            *areas.entry(signal.therapeutic_area.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = areas.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    out.push_str("\nTop therapeutic areas:\n");
    for (area, count) in ranked.iter().take(5) {
        out.push_str(&format!("  {area}: {count}\n"));
    }

    out.push_str(&format!("\nSaved to: {output}\n"));
    out
}

/// Summary for a succession-scored RIA run: score distribution plus the
/// ten strongest leads.
pub fn format_succession_summary(leads: &[AdvLead], rows_read: usize, output: &str) -> String {
    let bucket = |lo: u32, hi: u32| leads.iter().filter(|l| l.score >= lo && l.score <= hi).count();

    let mut out = String::new();
    out.push_str(&format!("Rows read: {rows_read}\n"));
    out.push_str(&format!("Qualified leads: {}\n", leads.len()));

    out.push_str("\nScore distribution:\n");
    out.push_str(&format!("  90+  : {}\n", leads.iter().filter(|l| l.score >= 90).count()));
    out.push_str(&format!("  70-89: {}\n", bucket(70, 89)));
    out.push_str(&format!("  50-69: {}\n", bucket(50, 69)));
    out.push_str(&format!("  40-49: {}\n", bucket(40, 49)));

    out.push_str("\nTop leads:\n");
    for lead in leads.iter().take(10) {
        out.push_str(&format!(
            "  [{:>3}] {} ({}) ${:.0}M AUM\n",
            lead.score,
            lead.company_name,
            if lead.state.is_empty() { "--" } else { &lead.state },
            lead.aum / 1_000_000.0
        ));
    }

    out.push_str(&format!("\nSaved to: {output}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(tier: &str, amount: u64, area: &str, outsource: &str) -> GrantSignal {
        GrantSignal {
            signal_tier: tier.to_string(),
            grant_amount: amount,
            therapeutic_area: area.to_string(),
            outsource_likelihood: outsource.to_string(),
            ..GrantSignal::default()
        }
    }

    #[test]
    fn demand_summary_counts_by_state() {
        let leads = vec![
            DemandLead {
                state: "TX".to_string(),
                ..DemandLead::default()
            },
            DemandLead {
                state: "TX".to_string(),
                ..DemandLead::default()
            },
            DemandLead {
                state: "CA".to_string(),
                ..DemandLead::default()
            },
        ];
        let out = format_demand_summary(&leads, "demand.csv");
        assert!(out.contains("Leads: 3"));
        assert!(out.contains("TX: 2"));
        assert!(out.contains("CA: 1"));
        assert!(out.contains("Saved to: demand.csv"));
    }

    #[test]
    fn grant_summary_totals_and_tiers() {
        let signals = vec![
            grant("A+", 2_000_000, "Oncology", "HIGH"),
            grant("A", 1_000_000, "Oncology", "MEDIUM"),
            grant("B", 500_000, "Neurology", "HIGH"),
        ];
        let out = format_grant_summary(&signals, "grants.csv");
        assert!(out.contains("Grant signals: 3"));
        assert!(out.contains("A+: 1"));
        assert!(out.contains("Total funding: $3.5M"));
        assert!(out.contains("High outsource likelihood: 2"));
        assert!(out.contains("Oncology: 2"));
    }

    #[test]
    fn succession_summary_buckets_scores() {
        let leads: Vec<AdvLead> = [95, 72, 55, 41]
            .iter()
            .map(|&score| AdvLead {
                score,
                company_name: format!("Firm {score}"),
                aum: 100_000_000.0,
                ..AdvLead::default()
            })
            .collect();
        let out = format_succession_summary(&leads, 200, "rias.csv");
        assert!(out.contains("Rows read: 200"));
        assert!(out.contains("90+  : 1"));
        assert!(out.contains("70-89: 1"));
        assert!(out.contains("50-69: 1"));
        assert!(out.contains("40-49: 1"));
        assert!(out.contains("[ 95] Firm 95"));
    }
}
