//! RIA succession-likelihood scoring.
//!
//! Firms most likely to sell or merge: mature, individually owned, sellable
//! AUM, still actively filing. Each met condition adds fixed points and a
//! human-readable reason; the reasons string goes straight into the output
//! CSV's Signal column.

use chrono::NaiveDate;

/// The firm attributes the scorer looks at.
#[derive(Debug, Clone, Default)]
pub struct SuccessionFacts {
    /// Form of organization ("Individual", "Partnership", "LLC", ...).
    pub org_form: String,
    pub formation_date: Option<NaiveDate>,
    /// Assets under management, dollars.
    pub aum: f64,
    pub last_filed: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuccessionTier {
    A,
    B,
    C,
    D,
}

impl SuccessionTier {
    pub fn label(self) -> &'static str {
        match self {
            SuccessionTier::A => "A",
            SuccessionTier::B => "B",
            SuccessionTier::C => "C",
            SuccessionTier::D => "D",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuccessionScore {
    pub score: u32,
    pub tier: SuccessionTier,
    pub reasons: String,
}

/// Score succession likelihood from firm attributes.
pub fn score(facts: &SuccessionFacts, today: NaiveDate) -> SuccessionScore {
    let mut score = 0u32;
    let mut reasons: Vec<String> = Vec::new();

    // Ownership structure: no partners to complicate a sale.
    let org = facts.org_form.to_ascii_lowercase();
    if org.contains("individual") || org.contains("sole") {
        score += 30;
        reasons.push("Individual ownership".to_string());
    } else if org.contains("partnership") {
        score += 15;
        reasons.push("Partnership structure".to_string());
    } else if org.contains("corporation") || org.contains("llc") {
        score += 10;
        reasons.push("Corporate structure".to_string());
    }

    // Firm age: founders of 15+ year firms are thinking about succession.
    if let Some(formed) = facts.formation_date {
        let years_old = (today - formed).num_days() as f64 / 365.0;
        if years_old >= 20.0 {
            score += 25;
            reasons.push(format!("Mature firm ({} years)", years_old as i64));
        } else if years_old >= 15.0 {
            score += 20;
            reasons.push(format!("Established firm ({} years)", years_old as i64));
        } else if years_old >= 10.0 {
            score += 10;
            reasons.push(format!("Mid-stage firm ({} years)", years_old as i64));
        }
    }

    // AUM: $50M-$500M is the sweet spot most likely to transact.
    let aum_m = facts.aum / 1_000_000.0;
    if (50_000_000.0..=500_000_000.0).contains(&facts.aum) {
        score += 25;
        reasons.push(format!("Sweet spot AUM (${aum_m:.0}M)"));
    } else if facts.aum > 500_000_000.0 {
        score += 15;
        reasons.push(format!("Large AUM (${aum_m:.0}M)"));
    } else if facts.aum >= 20_000_000.0 {
        score += 10;
        reasons.push(format!("Viable AUM (${aum_m:.0}M)"));
    }

    // Recent filing: engaged, not an abandoned registration.
    if let Some(filed) = facts.last_filed {
        let months_since = (today - filed).num_days() as f64 / 30.0;
        if months_since >= 0.0 {
            if months_since <= 6.0 {
                score += 20;
                reasons.push("Recently active (filed <6mo)".to_string());
            } else if months_since <= 12.0 {
                score += 15;
                reasons.push("Active (filed <12mo)".to_string());
            }
        }
    }

    let tier = if score >= 70 {
        SuccessionTier::A
    } else if score >= 55 {
        SuccessionTier::B
    } else if score >= 40 {
        SuccessionTier::C
    } else {
        SuccessionTier::D
    };

    SuccessionScore {
        score,
        tier,
        reasons: reasons.join("; "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn mature_solo_firm() -> SuccessionFacts {
        SuccessionFacts {
            org_form: "Sole Proprietorship / Individual".to_string(),
            formation_date: NaiveDate::from_ymd_opt(2001, 6, 1),
            aum: 120_000_000.0,
            last_filed: NaiveDate::from_ymd_opt(2026, 1, 10),
        }
    }

    #[test]
    fn strongest_profile_scores_full_points() {
        let result = score(&mature_solo_firm(), today());
        // 30 ownership + 25 age + 25 aum + 20 recency.
        assert_eq!(result.score, 100);
        assert_eq!(result.tier, SuccessionTier::A);
        assert_eq!(
            result.reasons,
            "Individual ownership; Mature firm (24 years); Sweet spot AUM ($120M); Recently active (filed <6mo)"
        );
    }

    #[test]
    fn scoring_is_idempotent() {
        let facts = mature_solo_firm();
        let a = score(&facts, today());
        let b = score(&facts, today());
        assert_eq!(a.score, b.score);
        assert_eq!(a.tier, b.tier);
        assert_eq!(a.reasons, b.reasons);
    }

    #[test]
    fn older_firms_never_score_less_on_age() {
        let mut facts = SuccessionFacts::default();
        let mut prev = 0u32;
        for years in [5, 10, 15, 20, 30] {
            facts.formation_date = NaiveDate::from_ymd_opt(2026 - years, 1, 1);
            let s = score(&facts, today()).score;
            assert!(s >= prev, "age {years}y scored {s} < {prev}");
            prev = s;
        }
    }

    #[test]
    fn aum_sweet_spot_outranks_large() {
        let mut facts = SuccessionFacts::default();
        facts.aum = 200_000_000.0;
        let sweet = score(&facts, today()).score;
        facts.aum = 900_000_000.0;
        let large = score(&facts, today()).score;
        assert_eq!(sweet, 25);
        assert_eq!(large, 15);
    }

    #[test]
    fn empty_facts_score_zero_tier_d() {
        let result = score(&SuccessionFacts::default(), today());
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, SuccessionTier::D);
        assert_eq!(result.reasons, "");
    }

    #[test]
    fn tier_boundaries() {
        // Partnership (15) + established (20) + viable aum (10) + filed <12mo (15) = 60 -> B.
        let facts = SuccessionFacts {
            org_form: "Limited Partnership".to_string(),
            formation_date: NaiveDate::from_ymd_opt(2009, 1, 1),
            aum: 30_000_000.0,
            last_filed: NaiveDate::from_ymd_opt(2025, 7, 1),
        };
        let result = score(&facts, today());
        assert_eq!(result.score, 60);
        assert_eq!(result.tier, SuccessionTier::B);
    }
}
