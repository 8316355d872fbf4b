//! Country name normalization: a small static alias table mapping
//! source-specific labels to canonical official names, plus an IOC code
//! lookup for display. Pure lookups, no I/O.
//!
//! Matching against the draft does NOT go through the alias table; scoring
//! matches raw country strings by substring containment (see `core::score`).

/// Source label → canonical official name.
const ALIASES: &[(&str, &str)] = &[
    ("South Korea", "Korea, Republic of"),
    ("North Korea", "Korea, Democratic People's Republic of"),
    ("Turkey", "Türkiye"),
    ("Great Britain", "United Kingdom"),
    ("Ivory Coast", "Côte d'Ivoire"),
    ("Czech Republic", "Czechia"),
];

/// Canonical name → IOC code. Covers the countries seen in draft
/// configurations plus common table leaders; lookup misses are fine.
const IOC_CODES: &[(&str, &str)] = &[
    ("China", "CHN"),
    ("Colombia", "COL"),
    ("Croatia", "CRO"),
    ("Denmark", "DEN"),
    ("Egypt", "EGY"),
    ("Finland", "FIN"),
    ("France", "FRA"),
    ("Germany", "GER"),
    ("Israel", "ISR"),
    ("Italy", "ITA"),
    ("Jamaica", "JAM"),
    ("Japan", "JPN"),
    ("Korea, Republic of", "KOR"),
    ("Mexico", "MEX"),
    ("Netherlands", "NED"),
    ("New Zealand", "NZL"),
    ("Norway", "NOR"),
    ("Peru", "PER"),
    ("Portugal", "POR"),
    ("Slovenia", "SLO"),
    ("South Africa", "RSA"),
    ("Spain", "ESP"),
    ("Sweden", "SWE"),
    ("Türkiye", "TUR"),
    ("Ukraine", "UKR"),
    ("United Kingdom", "GBR"),
    ("United States", "USA"),
];

/// Map a source country label to its canonical form. Unknown labels pass
/// through trimmed but otherwise unchanged.
pub fn canonical_name(label: &str) -> &str {
    let trimmed = label.trim();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(trimmed)
}

/// IOC code for a country label, resolved through the alias table first.
pub fn ioc_code(label: &str) -> Option<&'static str> {
    let canonical = canonical_name(label);
    IOC_CODES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, code)| *code)
}
