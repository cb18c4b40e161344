//! Record store seam
//!
//! The scan and report services take an injected `ReportStore` handle
//! instead of reaching for a global connection, so tests run against
//! `MemoryReportStore` without a database.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::AppError;
use crate::models::{NewReport, ReportFilter, ReportedQr};

/// Persistence operations needed by the services
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert(&self, report: &NewReport) -> Result<ReportedQr, AppError>;
    async fn find_blacklisted(&self, qr_content: &str) -> Result<Option<ReportedQr>, AppError>;
    async fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportedQr>, AppError>;
}

/// Production store backed by PostgreSQL
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, report: &NewReport) -> Result<ReportedQr, AppError> {
        Ok(ReportedQr::create(&self.pool, report).await?)
    }

    async fn find_blacklisted(&self, qr_content: &str) -> Result<Option<ReportedQr>, AppError> {
        Ok(ReportedQr::find_blacklisted(&self.pool, qr_content).await?)
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportedQr>, AppError> {
        Ok(ReportedQr::list(&self.pool, filter).await?)
    }
}
