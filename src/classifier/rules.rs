//! Classification rule table
//!
//! Rules are data, not code: an ordered list of matcher/outcome pairs that
//! can be replaced from a JSON file without redeploying. The engine applies
//! them first-match-wins, so the order of entries is load-bearing.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::types::ScanStatus;

// ============================================================================
// DEFAULT RULE CONSTANTS
// ============================================================================

/// Domains treated as known-malicious wherever they appear in a payload
pub const MALICIOUS_DOMAINS: &[&str] = &["malicious.com", "phishing.xyz", "scam.net"];

/// Phrases typical of phishing lures
pub const SUSPICIOUS_PHRASES: &[&str] = &["verify-account", "urgent-update"];

/// Payloads longer than this are flagged regardless of content
pub const SUSPICIOUS_LENGTH: usize = 150;

/// Marker string standing in for a detected hidden payload
pub const HIDDEN_PAYLOAD_MARKER: &str = "lsb_modified_data_hidden_secret_code";

/// Structured payment URI scheme recognized as well-formed
pub const PAYMENT_SCHEME_PREFIX: &str = "upi://";

// ============================================================================
// MATCHERS
// ============================================================================

/// Predicate over a payload. The engine lowercases the payload once per
/// classification; needles and prefixes are folded to lowercase when a
/// rule set is built or loaded, so all matching is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Matcher {
    /// Any of the needles appears in the payload
    Contains { any: Vec<String> },
    /// Payload exceeds a fixed character count
    LongerThan { chars: usize },
    /// Payload begins with the prefix
    StartsWith { prefix: String },
    /// At least one sub-matcher matches
    AnyOf { matchers: Vec<Matcher> },
    /// Every sub-matcher matches
    AllOf { matchers: Vec<Matcher> },
}

impl Matcher {
    /// Evaluate against a payload already lowercased by the engine
    pub fn matches(&self, payload: &str) -> bool {
        match self {
            Matcher::Contains { any } => any.iter().any(|needle| payload.contains(needle.as_str())),
            Matcher::LongerThan { chars } => payload.chars().count() > *chars,
            Matcher::StartsWith { prefix } => payload.starts_with(prefix.as_str()),
            Matcher::AnyOf { matchers } => matchers.iter().any(|m| m.matches(payload)),
            Matcher::AllOf { matchers } => matchers.iter().all(|m| m.matches(payload)),
        }
    }

    fn normalize(&mut self) {
        match self {
            Matcher::Contains { any } => {
                for needle in any {
                    *needle = needle.to_lowercase();
                }
            }
            Matcher::StartsWith { prefix } => *prefix = prefix.to_lowercase(),
            Matcher::AnyOf { matchers } | Matcher::AllOf { matchers } => {
                for matcher in matchers {
                    matcher.normalize();
                }
            }
            Matcher::LongerThan { .. } => {}
        }
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// One ordered entry of the rule table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub name: String,
    pub matcher: Matcher,
    pub status: ScanStatus,
    pub message: String,
}

/// Outcome used when no rule matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackOutcome {
    pub status: ScanStatus,
    pub message: String,
}

/// Ordered rule table plus the fallback outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<ClassificationRule>,
    pub fallback: FallbackOutcome,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: vec![
                ClassificationRule {
                    name: "known-malicious-domain".to_string(),
                    matcher: Matcher::Contains {
                        any: MALICIOUS_DOMAINS.iter().map(|s| s.to_string()).collect(),
                    },
                    status: ScanStatus::Malicious,
                    message: "Detected as a known malicious domain. AVOID!".to_string(),
                },
                ClassificationRule {
                    name: "suspicious-shape".to_string(),
                    matcher: Matcher::AnyOf {
                        matchers: vec![
                            Matcher::LongerThan { chars: SUSPICIOUS_LENGTH },
                            Matcher::Contains {
                                any: SUSPICIOUS_PHRASES.iter().map(|s| s.to_string()).collect(),
                            },
                        ],
                    },
                    status: ScanStatus::Suspicious,
                    message: "Contains suspicious elements or unusual length. Proceed with caution."
                        .to_string(),
                },
                ClassificationRule {
                    name: "hidden-payload-marker".to_string(),
                    matcher: Matcher::Contains {
                        any: vec![HIDDEN_PAYLOAD_MARKER.to_string()],
                    },
                    status: ScanStatus::Malicious,
                    message: "Hidden data detected inside this QR code. AVOID!".to_string(),
                },
                ClassificationRule {
                    name: "structured-payment-format".to_string(),
                    matcher: Matcher::AllOf {
                        matchers: vec![
                            Matcher::StartsWith { prefix: PAYMENT_SCHEME_PREFIX.to_string() },
                            Matcher::Contains { any: vec!["@".to_string()] },
                        ],
                    },
                    status: ScanStatus::Safe,
                    message: "Appears to be a valid UPI payment QR code.".to_string(),
                },
            ],
            fallback: FallbackOutcome {
                status: ScanStatus::Safe,
                message: "QR code appears safe. Always verify receiver details before payment."
                    .to_string(),
            },
        }
    }
}

impl RuleSet {
    /// Parse a rule table from JSON and fold its needles to lowercase
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut set: RuleSet = serde_json::from_str(json).context("invalid rule table")?;
        set.normalize();
        Ok(set)
    }

    /// Load a rule table from a JSON file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading rule table {}", path))?;
        Self::from_json(&raw)
    }

    fn normalize(&mut self) {
        for rule in &mut self.rules {
            rule.matcher.normalize();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn default_table_keeps_rule_order() {
        let rules = RuleSet::default();
        assert_eq!(rules.rules.len(), 4);
        assert_eq!(rules.rules[0].name, "known-malicious-domain");
        assert_eq!(rules.rules[0].status, ScanStatus::Malicious);
        assert_eq!(rules.fallback.status, ScanStatus::Safe);
    }

    #[test]
    fn custom_table_loads_and_normalizes_needles() {
        let json = r#"{
            "rules": [
                {
                    "name": "blocked-host",
                    "matcher": { "kind": "contains", "any": ["EVIL.example"] },
                    "status": "Malicious",
                    "message": "Blocked host."
                }
            ],
            "fallback": { "status": "Safe", "message": "No rule matched." }
        }"#;

        let rules = RuleSet::from_json(json).unwrap();
        let verdict = classify("https://evil.EXAMPLE/path", &rules);
        assert_eq!(verdict.status, ScanStatus::Malicious);
        assert_eq!(verdict.message, "Blocked host.");
    }

    #[test]
    fn first_match_wins_in_file_order() {
        let json = r#"{
            "rules": [
                {
                    "name": "first",
                    "matcher": { "kind": "contains", "any": ["token"] },
                    "status": "Suspicious",
                    "message": "first"
                },
                {
                    "name": "second",
                    "matcher": { "kind": "contains", "any": ["token"] },
                    "status": "Malicious",
                    "message": "second"
                }
            ],
            "fallback": { "status": "Safe", "message": "fallback" }
        }"#;

        let rules = RuleSet::from_json(json).unwrap();
        let verdict = classify("has token inside", &rules);
        assert_eq!(verdict.status, ScanStatus::Suspicious);
        assert_eq!(verdict.message, "first");
    }

    #[test]
    fn rejects_malformed_table() {
        assert!(RuleSet::from_json(r#"{"rules": 3}"#).is_err());
    }
}
