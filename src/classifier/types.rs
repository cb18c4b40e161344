//! Classifier types

use serde::{Deserialize, Serialize};

/// Safety classification of a scanned payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    /// No known risk markers
    Safe,
    /// Unusual content, proceed with caution
    Suspicious,
    /// Known-bad content, do not proceed
    Malicious,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Safe => "Safe",
            ScanStatus::Suspicious => "Suspicious",
            ScanStatus::Malicious => "Malicious",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification outcome: a status plus the message explaining which
/// check produced it. The message is part of the API contract and is
/// always non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub status: ScanStatus,
    pub message: String,
}
