//! QR payload classification
//!
//! Maps a raw payload string to Safe/Suspicious/Malicious by evaluating an
//! ordered rule table. First match wins.
//!
//! ## Structure
//! - `types`: Core types (ScanStatus, Verdict)
//! - `rules`: Rule table, matchers, default rules and constants
//! - `engine`: Classification logic

pub mod types;
pub mod rules;
pub mod engine;

pub use types::{ScanStatus, Verdict};
pub use rules::{ClassificationRule, Matcher, RuleSet};
pub use engine::classify;
