//! File-identity key derivation.
//!
//! Monthly exports from one provider differ only in date tokens
//! ("VenmoStatement_December_2025.csv", "VenmoStatement_January_2026.csv").
//! Stripping those tokens groups the whole family under one cached schema,
//! turning O(files) inference calls into O(distinct providers).

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Full month names must come before their abbreviations: leftmost-first
// alternation would otherwise eat "DEC" out of "DECEMBER" and leave "EMBER".
static MONTHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "JANUARY|FEBRUARY|MARCH|APRIL|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER\
         |JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC",
    )
    .expect("month pattern")
});

static YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20\d{2}").expect("year pattern"));

static NUMERIC_DATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}").expect("date pattern"));

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-]+").expect("separator pattern"));

/// Derive the cache key that groups recurring exports of one statement.
///
/// Uppercases the file stem, strips month names, 4-digit years starting with
/// "20", and slash/dash numeric dates, then collapses separator runs. Falls
/// back to the bare uppercased stem if nothing survives.
pub fn file_identity_key(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();

    // Whole numeric dates go first so "12-01-2025" is not left as "12-01-"
    // by the bare-year pass.
    let key = {
        let name = MONTHS.replace_all(&stem, "");
        let name = NUMERIC_DATES.replace_all(&name, "");
        let name = YEARS.replace_all(&name, "");
        let name = SEPARATOR_RUNS.replace_all(&name, "_");
        name.trim_matches('_').to_string()
    };

    if key.is_empty() { stem } else { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> String {
        file_identity_key(Path::new(name))
    }

    #[test]
    fn test_full_month_and_year_are_stripped() {
        assert_eq!(key("VenmoStatement_December_2025.csv"), "VENMOSTATEMENT");
        assert_eq!(key("VenmoStatement_January_2026.csv"), "VENMOSTATEMENT");
    }

    #[test]
    fn test_month_abbreviation_is_stripped() {
        assert_eq!(key("activity_AMEX_NOV.csv"), "ACTIVITY_AMEX");
        assert_eq!(key("activity_AMEX_DEC.csv"), "ACTIVITY_AMEX");
    }

    #[test]
    fn test_recurring_exports_share_a_key() {
        assert_eq!(key("AMEX_JAN.csv"), key("AMEX_FEB.csv"));
        assert_eq!(key("AMEX_JAN.csv"), "AMEX");
    }

    #[test]
    fn test_numeric_date_patterns_are_stripped() {
        assert_eq!(key("chase_12-01-2025.csv"), "CHASE");
        assert_eq!(key("chase_1/2/25.csv"), "CHASE");
    }

    #[test]
    fn test_all_date_tokens_falls_back_to_stem() {
        assert_eq!(key("DEC2025.csv"), "DEC2025");
    }

    #[test]
    fn test_plain_name_passes_through_uppercased() {
        assert_eq!(key("paypal.csv"), "PAYPAL");
    }
}
