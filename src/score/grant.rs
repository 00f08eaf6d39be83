//! NIH grant signal scoring.
//!
//! Points reward recent, well-funded, commercially-oriented grants. SBIR/STTR
//! activity codes are the strongest single signal: they mark small businesses
//! that outsource nearly everything.

use chrono::NaiveDate;

/// SBIR/STTR award activity codes.
const SBIR_STTR: [&str; 4] = ["R43", "R44", "R41", "R42"];

/// Grant facts the scorer looks at. All other record fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct GrantFacts {
    pub amount: u64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub activity_code: String,
    pub is_active: bool,
    pub is_new: bool,
    pub org_type: String,
}

/// Signal tier, highest threshold met wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantTier {
    APlus,
    A,
    B,
    C,
}

impl GrantTier {
    pub fn label(self) -> &'static str {
        match self {
            GrantTier::APlus => "A+",
            GrantTier::A => "A",
            GrantTier::B => "B",
            GrantTier::C => "C",
        }
    }

    /// Sort key: hotter tiers first.
    pub fn rank(self) -> u8 {
        match self {
            GrantTier::APlus => 0,
            GrantTier::A => 1,
            GrantTier::B => 2,
            GrantTier::C => 3,
        }
    }
}

/// Outsourcing likelihood bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outsource {
    High,
    Medium,
    Low,
}

impl Outsource {
    pub fn label(self) -> &'static str {
        match self {
            Outsource::High => "HIGH",
            Outsource::Medium => "MEDIUM",
            Outsource::Low => "LOW",
        }
    }
}

fn is_sbir_sttr(code: &str) -> bool {
    SBIR_STTR.contains(&code)
}

fn is_academic(org_type: &str) -> bool {
    org_type.contains("Higher Education")
}

/// Score a grant and bucket it into a tier.
pub fn score(facts: &GrantFacts, today: NaiveDate) -> (u32, GrantTier) {
    let mut score = 0u32;

    // Amount (0-40).
    score += if facts.amount >= 2_000_000 {
        40
    } else if facts.amount >= 1_000_000 {
        30
    } else if facts.amount >= 500_000 {
        20
    } else {
        10
    };

    // Start recency (0-30). Future-dated starts score nothing yet.
    if let Some(start) = facts.start_date {
        let days_ago = (today - start).num_days();
        if days_ago >= 0 {
            if days_ago <= 30 {
                score += 30;
            } else if days_ago <= 60 {
                score += 20;
            } else if days_ago <= 90 {
                score += 10;
            }
        }
    }

    // Activity code (0-20).
    if is_sbir_sttr(&facts.activity_code) {
        score += 20;
    } else if facts.activity_code == "R01" || facts.activity_code == "U01" {
        score += 15;
    } else if facts.activity_code == "R21" {
        score += 10;
    }

    if facts.is_active {
        score += 10;
    }
    if facts.is_new {
        score += 10;
    }
    // Commercial organizations outsource more than universities do.
    if !facts.org_type.is_empty() && !is_academic(&facts.org_type) {
        score += 10;
    }

    let tier = if score >= 80 {
        GrantTier::APlus
    } else if score >= 65 {
        GrantTier::A
    } else if score >= 50 {
        GrantTier::B
    } else {
        GrantTier::C
    };

    (score, tier)
}

/// Human-readable signal labels, `" | "`-joined.
pub fn signal_type(facts: &GrantFacts, today: NaiveDate) -> String {
    let mut signals: Vec<&str> = Vec::new();

    if facts.is_new {
        signals.push("NEW GRANT");
    }
    if let Some(start) = facts.start_date {
        let days_ago = (today - start).num_days();
        if (0..=60).contains(&days_ago) {
            signals.push("Fresh funding");
        }
    }
    if let Some(end) = facts.end_date {
        let months_until_end = (end - today).num_days() as f64 / 30.0;
        if months_until_end > 0.0 && months_until_end <= 12.0 {
            signals.push("Ending <12mo");
        }
    }
    if is_sbir_sttr(&facts.activity_code) {
        signals.push("SBIR/STTR (small co)");
    }
    if !facts.org_type.is_empty()
        && !is_academic(&facts.org_type)
        && !facts.org_type.contains("Hospital")
    {
        signals.push("Commercial");
    }

    if signals.is_empty() {
        "Active grant".to_string()
    } else {
        signals.join(" | ")
    }
}

/// How likely the grantee is to hire outside vendors (CROs, recruiters, ...).
pub fn outsource_likelihood(facts: &GrantFacts) -> Outsource {
    let mut score = 0u32;

    if is_sbir_sttr(&facts.activity_code) {
        score += 40;
    }

    if !facts.org_type.is_empty() {
        if !is_academic(&facts.org_type) && !facts.org_type.contains("Hospital") {
            score += 30;
        } else if facts.org_type.contains("Small Business") {
            score += 40;
        }
    }

    if facts.amount >= 2_000_000 {
        score += 20;
    } else if facts.amount >= 1_000_000 {
        score += 10;
    }

    if facts.is_new {
        score += 10;
    }

    if score >= 60 {
        Outsource::High
    } else if score >= 30 {
        Outsource::Medium
    } else {
        Outsource::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn base_facts() -> GrantFacts {
        GrantFacts {
            amount: 600_000,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            end_date: NaiveDate::from_ymd_opt(2028, 1, 15),
            activity_code: "R21".to_string(),
            is_active: true,
            is_new: false,
            org_type: "Small Business".to_string(),
        }
    }

    #[test]
    fn score_is_deterministic() {
        let facts = base_facts();
        let first = score(&facts, today());
        let second = score(&facts, today());
        assert_eq!(first, second);
    }

    #[test]
    fn raising_amount_never_lowers_score() {
        let mut facts = base_facts();
        let mut prev = 0u32;
        for amount in [0u64, 400_000, 500_000, 999_999, 1_000_000, 2_000_000, 50_000_000] {
            facts.amount = amount;
            let (s, _) = score(&facts, today());
            assert!(s >= prev, "score dropped at amount {amount}: {s} < {prev}");
            prev = s;
        }
    }

    #[test]
    fn fresher_start_never_lowers_score() {
        let mut facts = base_facts();
        let mut prev = 0u32;
        for days_ago in [120i64, 90, 60, 30, 0] {
            facts.start_date = Some(today() - chrono::Duration::days(days_ago));
            let (s, _) = score(&facts, today());
            assert!(s >= prev, "score dropped at {days_ago} days ago");
            prev = s;
        }
    }

    #[test]
    fn tier_thresholds() {
        // Max everything: 40 + 30 + 20 + 10 + 10 + 10 = 120 -> A+.
        let facts = GrantFacts {
            amount: 3_000_000,
            start_date: Some(today()),
            end_date: None,
            activity_code: "R44".to_string(),
            is_active: true,
            is_new: true,
            org_type: "Small Business".to_string(),
        };
        let (s, tier) = score(&facts, today());
        assert_eq!(s, 120);
        assert_eq!(tier, GrantTier::APlus);

        // Minimal: old academic grant under 500k -> C.
        let facts = GrantFacts {
            amount: 100_000,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
            activity_code: "T32".to_string(),
            is_active: false,
            is_new: false,
            org_type: "Higher Education".to_string(),
        };
        let (s, tier) = score(&facts, today());
        assert_eq!(s, 10);
        assert_eq!(tier, GrantTier::C);
    }

    #[test]
    fn future_start_dates_score_no_recency_points() {
        let mut facts = base_facts();
        facts.start_date = Some(today() + chrono::Duration::days(10));
        let (with_future, _) = score(&facts, today());
        facts.start_date = None;
        let (without, _) = score(&facts, today());
        assert_eq!(with_future, without);
    }

    #[test]
    fn signal_type_combines_labels() {
        let facts = GrantFacts {
            amount: 1_500_000,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            activity_code: "R43".to_string(),
            is_active: true,
            is_new: true,
            org_type: "Small Business".to_string(),
        };
        assert_eq!(
            signal_type(&facts, today()),
            "NEW GRANT | Fresh funding | Ending <12mo | SBIR/STTR (small co) | Commercial"
        );

        let quiet = GrantFacts {
            org_type: "Higher Education".to_string(),
            ..GrantFacts::default()
        };
        assert_eq!(signal_type(&quiet, today()), "Active grant");
    }

    #[test]
    fn outsource_buckets() {
        let sbir = GrantFacts {
            activity_code: "R43".to_string(),
            org_type: "Small Business".to_string(),
            amount: 2_500_000,
            is_new: true,
            ..GrantFacts::default()
        };
        assert_eq!(outsource_likelihood(&sbir), Outsource::High);

        let academic = GrantFacts {
            org_type: "Higher Education".to_string(),
            amount: 1_200_000,
            ..GrantFacts::default()
        };
        assert_eq!(outsource_likelihood(&academic), Outsource::Low);

        let commercial = GrantFacts {
            org_type: "For-Profit".to_string(),
            ..GrantFacts::default()
        };
        assert_eq!(outsource_likelihood(&commercial), Outsource::Medium);
    }
}
