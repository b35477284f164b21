//! Merchant-identity key derivation.
//!
//! Statement descriptions append location codes and transaction ids to the
//! merchant name; keeping only the leading tokens groups near-duplicates
//! ("TRADER JOE'S #553 AUSTIN TX", "TRADER JOE'S #553 DALLAS TX") under one
//! cached category.

/// Uppercased first four whitespace-delimited tokens of a description.
pub fn merchant_key(description: &str) -> String {
    let tokens: Vec<&str> = description.split_whitespace().take(4).collect();
    tokens.join(" ").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_suffixes_share_a_key() {
        assert_eq!(
            merchant_key("TRADER JOE'S #553 AUSTIN TX 00441"),
            merchant_key("Trader Joe's #553 Austin HEB PLAZA"),
        );
    }

    #[test]
    fn test_short_descriptions_keep_all_tokens() {
        assert_eq!(merchant_key("NETFLIX.COM"), "NETFLIX.COM");
        assert_eq!(merchant_key("uber trip"), "UBER TRIP");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(merchant_key("  AMEX   Dining  Credit "), "AMEX DINING CREDIT");
    }

    #[test]
    fn test_differing_fifth_token_is_ignored() {
        assert_eq!(
            merchant_key("CHIPOTLE ONLINE 1182 TX 98213"),
            merchant_key("CHIPOTLE ONLINE 1182 TX 55120"),
        );
    }
}
