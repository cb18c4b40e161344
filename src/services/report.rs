//! Report service

use std::sync::Arc;

use crate::models::{NewReport, ReportFilter, ReportedQr};
use crate::store::ReportStore;
use crate::{AppError, AppResult};

/// Reason recorded when the reporter does not give one
pub const DEFAULT_REASON: &str = "User reported as suspicious";

/// Principal recorded when no identity is available
pub const ANONYMOUS_REPORTER: &str = "anonymous";

/// One report submission, before validation
#[derive(Debug, Default)]
pub struct ReportSubmission {
    pub qr_content: String,
    pub reason: Option<String>,
    /// Identifier supplied in the request body
    pub user_id: Option<String>,
    /// Principal bound by the access gate
    pub principal: Option<String>,
}

/// Validates and persists community reports
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Validate and persist one report. Repeated reports of the same
    /// payload create distinct records; nothing is deduplicated.
    pub async fn report(&self, submission: ReportSubmission) -> AppResult<ReportedQr> {
        if submission.qr_content.is_empty() {
            return Err(AppError::Validation(
                "QR content is required for reporting.".to_string(),
            ));
        }

        let reason = submission
            .reason
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        // Authenticated identity wins over a caller-supplied id
        let reported_by = submission
            .principal
            .or(submission.user_id)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string());

        let record = self
            .store
            .insert(&NewReport {
                qr_content: submission.qr_content,
                reason,
                reported_by,
            })
            .await?;

        tracing::info!(
            qr_content = %record.qr_content,
            reported_by = %record.reported_by,
            "QR reported successfully"
        );
        Ok(record)
    }

    /// Stored reports, newest first
    pub async fn list(&self, filter: &ReportFilter) -> AppResult<Vec<ReportedQr>> {
        self.store.list(filter).await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryReportStore;

    fn submission(qr_content: &str) -> ReportSubmission {
        ReportSubmission {
            qr_content: qr_content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn report_round_trip_persists_all_fields() {
        let store = Arc::new(MemoryReportStore::default());
        let service = ReportService::new(store.clone());

        let record = service
            .report(ReportSubmission {
                qr_content: "upi://a@b".to_string(),
                reason: Some("suspicious link".to_string()),
                user_id: Some("user1".to_string()),
                principal: None,
            })
            .await
            .unwrap();

        assert_eq!(record.qr_content, "upi://a@b");
        assert_eq!(record.reason, "suspicious link");
        assert_eq!(record.reported_by, "user1");
        assert!(!record.is_blacklisted);

        let stored = store.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].qr_content, "upi://a@b");
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let service = ReportService::new(Arc::new(MemoryReportStore::default()));
        let err = service.report(submission("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_reason_gets_the_default() {
        let service = ReportService::new(Arc::new(MemoryReportStore::default()));

        let record = service.report(submission("https://example.com")).await.unwrap();
        assert_eq!(record.reason, DEFAULT_REASON);

        let record = service
            .report(ReportSubmission {
                qr_content: "https://example.com".to_string(),
                reason: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(record.reason, DEFAULT_REASON);
    }

    #[tokio::test]
    async fn authenticated_principal_wins_over_supplied_id() {
        let service = ReportService::new(Arc::new(MemoryReportStore::default()));

        let record = service
            .report(ReportSubmission {
                qr_content: "https://example.com".to_string(),
                user_id: Some("user1".to_string()),
                principal: Some("backend_reporter".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(record.reported_by, "backend_reporter");
    }

    #[tokio::test]
    async fn unidentified_reporter_defaults_to_anonymous() {
        let service = ReportService::new(Arc::new(MemoryReportStore::default()));

        let record = service.report(submission("https://example.com")).await.unwrap();
        assert_eq!(record.reported_by, ANONYMOUS_REPORTER);
    }

    #[tokio::test]
    async fn repeated_reports_create_distinct_records() {
        let store = Arc::new(MemoryReportStore::default());
        let service = ReportService::new(store.clone());

        let first = service.report(submission("https://example.com")).await.unwrap();
        let second = service.report(submission("https://example.com")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.all().len(), 2);
    }
}
