//! Scan service

use std::sync::Arc;

use crate::classifier::{self, RuleSet, ScanStatus, Verdict};
use crate::store::ReportStore;
use crate::{AppError, AppResult};

/// Verdict message used when the blacklist short-circuits classification
const BLACKLISTED_MESSAGE: &str =
    "This QR has been blacklisted by the community for suspicious activity.";

/// Orchestrates the blacklist lookup, then rule classification
#[derive(Clone)]
pub struct ScanService {
    store: Arc<dyn ReportStore>,
    rules: Arc<RuleSet>,
}

impl ScanService {
    pub fn new(store: Arc<dyn ReportStore>, rules: Arc<RuleSet>) -> Self {
        Self { store, rules }
    }

    /// Classify a payload. A community-blacklisted record takes precedence
    /// over rule evaluation.
    pub async fn scan(&self, payload: &str) -> AppResult<Verdict> {
        if payload.is_empty() {
            return Err(AppError::Validation(
                "QR content is required for scanning.".to_string(),
            ));
        }

        if self.store.find_blacklisted(payload).await?.is_some() {
            tracing::debug!("payload matched a blacklisted report");
            return Ok(Verdict {
                status: ScanStatus::Malicious,
                message: BLACKLISTED_MESSAGE.to_string(),
            });
        }

        Ok(classifier::classify(payload, &self.rules))
    }
}

// ============================================================================
// TESTS
// ============================================================================
