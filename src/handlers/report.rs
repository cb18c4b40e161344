//! Report handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::middleware::auth::ReporterContext;
use crate::models::{ReportFilter, ReportedQr};
use crate::services::ReportSubmission;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "QR content is required for reporting."))]
    pub qr_content: String,
    pub reason: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/report - file a community report for a payload
pub async fn report(
    State(state): State<AppState>,
    reporter: ReporterContext,
    Json(req): Json<ReportRequest>,
) -> AppResult<(StatusCode, Json<ReportResponse>)> {
    req.validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    state
        .reports
        .report(ReportSubmission {
            qr_content: req.qr_content,
            reason: req.reason,
            user_id: req.user_id,
            principal: Some(reporter.principal),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            success: true,
            message: "QR reported successfully! Thank you for your contribution.".to_string(),
        }),
    ))
}

/// GET /api/reports - stored reports, newest first
pub async fn list(
    State(state): State<AppState>,
    _reporter: ReporterContext,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Vec<ReportedQr>>> {
    let reports = state.reports.list(&filter).await?;
    Ok(Json(reports))
}
