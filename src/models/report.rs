//! Reported QR model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// One community report of a QR payload.
///
/// Records are append-only. The same payload may be reported any number of
/// times; `is_blacklisted` is flipped only by out-of-band moderation, never
/// by report volume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReportedQr {
    pub id: Uuid,
    pub qr_content: String,
    pub reason: String,
    pub reported_by: String,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub qr_content: String,
    pub reason: String,
    pub reported_by: String,
}

/// Listing filter for stored reports
#[derive(Debug, Deserialize, Default)]
pub struct ReportFilter {
    pub blacklisted: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ReportedQr {
    pub async fn create(pool: &PgPool, report: &NewReport) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ReportedQr>(
            r#"
            INSERT INTO reported_qrs (qr_content, reason, reported_by, is_blacklisted)
            VALUES ($1, $2, $3, false)
            RETURNING *
            "#
        )
        .bind(&report.qr_content)
        .bind(&report.reason)
        .bind(&report.reported_by)
        .fetch_one(pool)
        .await
    }

    /// Any record matching the payload with the blacklist flag set
    pub async fn find_blacklisted(pool: &PgPool, qr_content: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ReportedQr>(
            "SELECT * FROM reported_qrs WHERE qr_content = $1 AND is_blacklisted = true LIMIT 1"
        )
        .bind(qr_content)
        .fetch_optional(pool)
        .await
    }

    pub async fn list(pool: &PgPool, filter: &ReportFilter) -> Result<Vec<Self>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(50);
        let offset = filter.offset.unwrap_or(0);

        match filter.blacklisted {
            Some(flag) => {
                sqlx::query_as::<_, ReportedQr>(
                    r#"
                    SELECT * FROM reported_qrs
                    WHERE is_blacklisted = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#
                )
                .bind(flag)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ReportedQr>(
                    "SELECT * FROM reported_qrs ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
            }
        }
    }
}
