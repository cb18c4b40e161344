//! Classification engine
//!
//! Pure first-match-wins evaluation of the rule table. No I/O, no state:
//! classifying the same payload against the same table twice returns the
//! same verdict.

use super::rules::RuleSet;
use super::types::Verdict;

/// Classify a payload against an ordered rule table
pub fn classify(payload: &str, rules: &RuleSet) -> Verdict {
    let haystack = payload.to_lowercase();

    for rule in &rules.rules {
        if rule.matcher.matches(&haystack) {
            tracing::debug!(rule = %rule.name, status = %rule.status, "classification rule matched");
            return Verdict {
                status: rule.status,
                message: rule.message.clone(),
            };
        }
    }

    Verdict {
        status: rules.fallback.status,
        message: rules.fallback.message.clone(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::types::ScanStatus;

    fn classify_default(payload: &str) -> Verdict {
        classify(payload, &RuleSet::default())
    }

    #[test]
    fn known_malicious_domain_is_malicious() {
        let verdict = classify_default("https://phishing.xyz/login");
        assert_eq!(verdict.status, ScanStatus::Malicious);
        assert!(!verdict.message.is_empty());
    }

    #[test]
    fn malicious_domain_wins_over_length() {
        // rule order matters: the domain check precedes the length check
        let long = format!("https://malicious.com/{}", "a".repeat(200));
        assert_eq!(classify_default(&long).status, ScanStatus::Malicious);
    }

    #[test]
    fn overlong_payload_is_suspicious() {
        let payload = "a".repeat(151);
        assert_eq!(classify_default(&payload).status, ScanStatus::Suspicious);
    }

    #[test]
    fn boundary_length_is_not_suspicious() {
        let payload = "a".repeat(150);
        assert_eq!(classify_default(&payload).status, ScanStatus::Safe);
    }

    #[test]
    fn phishing_phrase_is_suspicious() {
        let verdict = classify_default("https://example.com/verify-account");
        assert_eq!(verdict.status, ScanStatus::Suspicious);
    }

    #[test]
    fn hidden_payload_marker_is_malicious() {
        let verdict = classify_default("data:LSB_MODIFIED_DATA_HIDDEN_SECRET_CODE");
        assert_eq!(verdict.status, ScanStatus::Malicious);
    }

    #[test]
    fn length_rule_shadows_marker_for_overlong_payloads() {
        let payload = format!("{}{}", "x".repeat(151), "lsb_modified_data_hidden_secret_code");
        assert_eq!(classify_default(&payload).status, ScanStatus::Suspicious);
    }

    #[test]
    fn upi_payload_with_handle_is_safe() {
        let verdict = classify_default("upi://pay?pa=merchant@bank");
        assert_eq!(verdict.status, ScanStatus::Safe);
        assert!(verdict.message.contains("UPI"));
    }

    #[test]
    fn upi_payload_without_handle_falls_through() {
        let verdict = classify_default("upi://pay?pa=merchant");
        assert_eq!(verdict.status, ScanStatus::Safe);
        assert!(!verdict.message.contains("UPI"));
    }

    #[test]
    fn unremarkable_payload_falls_back_to_safe() {
        let verdict = classify_default("https://example.com");
        assert_eq!(verdict.status, ScanStatus::Safe);
        assert!(!verdict.message.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_default("HTTPS://MALICIOUS.COM/OFFER").status, ScanStatus::Malicious);
        assert_eq!(classify_default("UPI://PAY?PA=A@B").status, ScanStatus::Safe);
    }

    #[test]
    fn classification_is_deterministic() {
        let rules = RuleSet::default();
        let payload = "upi://merchant@bank";

        let first = classify(payload, &rules);
        let second = classify(payload, &rules);
        assert_eq!(first.status, second.status);
        assert_eq!(first.message, second.message);
    }
}
