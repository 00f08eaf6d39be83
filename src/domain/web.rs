//! Website/domain cleanup and money parsing.
//!
//! Lead sources hand back websites in every imaginable shape: full URLs,
//! bare domains, social-media profiles standing in for a homepage. Outreach
//! tooling downstream wants a bare company domain, so we normalize here and
//! fall back to deriving one from the company name.

/// Domains that are never a company homepage.
const SOCIAL_DOMAINS: [&str; 4] = ["twitter.com", "linkedin.com", "x.com", "facebook.com"];

/// Legal/boilerplate suffixes stripped before deriving a domain.
///
/// Ordered so comma-forms win before their bare variants. "ventures",
/// "capital" and "partners" are deliberately kept: firms usually carry them
/// into the domain ("Lux Capital" -> luxcapital.com).
const NAME_SUFFIXES: [&str; 13] = [
    ", llc", ", lp", ", l.p.", " llc", " lp", " l.p.", " management", " company", ", inc.",
    ", inc", " incorporated", " inc", " corp",
];

/// Normalize a website value to a bare domain.
///
/// Strips scheme and `www.`, cuts at the first path separator, and rejects
/// social-media domains (returns empty so callers can derive instead).
pub fn clean_domain(website: &str) -> String {
    let mut domain = website.trim().to_ascii_lowercase();
    for prefix in ["https://", "http://", "www."] {
        if let Some(rest) = domain.strip_prefix(prefix) {
            domain = rest.to_string();
        }
    }
    let domain = domain
        .split(['/', ';'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    if is_social_domain(&domain) {
        return String::new();
    }
    domain
}

/// True for social-media domains (and their subdomains) that should never be
/// used as a company domain.
pub fn is_social_domain(domain: &str) -> bool {
    let domain = domain.trim().to_ascii_lowercase();
    SOCIAL_DOMAINS
        .iter()
        .any(|bad| domain == *bad || domain.ends_with(&format!(".{bad}")))
}

/// Best-effort guess of a company domain from its legal name.
///
/// `"Lux Capital Management, LLC"` -> `"luxcapital.com"`. Returns empty when
/// nothing usable remains after stripping.
pub fn derive_domain(company_name: &str) -> String {
    let mut name = company_name.to_ascii_lowercase();
    for suffix in NAME_SUFFIXES {
        name = name.replace(suffix, "");
    }
    let name: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if name.is_empty() {
        String::new()
    } else {
        format!("{name}.com")
    }
}

/// Parse a money value as exported by SEC bulk files.
///
/// Accepts `$`, thousands separators, and `M`/`B` suffixes. Unparseable
/// values become 0 — a missing AUM simply scores no AUM points.
pub fn parse_money(raw: &str) -> f64 {
    let cleaned = raw.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }

    let upper = cleaned.to_ascii_uppercase();
    let (digits, scale) = if let Some(v) = upper.strip_suffix('B') {
        (v, 1_000_000_000.0)
    } else if let Some(v) = upper.strip_suffix('M') {
        (v, 1_000_000.0)
    } else {
        (upper.as_str(), 1.0)
    };

    match digits.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v * scale,
        _ => 0.0,
    }
}
