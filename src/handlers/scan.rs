//! Scan handler

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::classifier::Verdict;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "QR content is required for scanning."))]
    pub qr_content: String,
}

/// POST /api/scan - classify a submitted payload
pub async fn scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> AppResult<Json<Verdict>> {
    req.validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let verdict = state.scan.scan(&req.qr_content).await?;
    Ok(Json(verdict))
}
