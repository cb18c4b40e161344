//! Authentication middleware

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use crate::{AppError, AppState};

/// Identity shared by every caller the static verifier accepts
const SHARED_REPORTER_IDENTITY: &str = "safeqr_backend_reporter";

/// Pluggable credential check: a valid token yields the caller's principal.
/// Swapping in a real token or session scheme means implementing this trait
/// and leaves the report workflow untouched.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<String>;
}

/// Placeholder verifier that accepts exactly one configured secret.
///
/// Not a real authentication scheme: no sessions, no expiry, and every
/// authenticated caller shares one identity. Only the SHA-256 of the secret
/// is retained.
pub struct StaticTokenVerifier {
    token_hash: String,
}

impl StaticTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            token_hash: hash_token(secret),
        }
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<String> {
        if hash_token(token) == self.token_hash {
            Some(SHARED_REPORTER_IDENTITY.to_string())
        } else {
            None
        }
    }
}

/// Reporter context bound to the request after a successful token check
#[derive(Debug, Clone)]
pub struct ReporterContext {
    pub principal: String,
}

/// Middleware: require a valid bearer token before reaching report handlers
pub async fn require_reporter_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&req)?;

    let principal = state.verifier.verify(&token).ok_or_else(|| {
        tracing::warn!("Unauthorized access attempt: invalid or missing token");
        AppError::Unauthorized
    })?;

    req.extensions_mut().insert(ReporterContext { principal });

    Ok(next.run(req).await)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &Request) -> Result<String, AppError> {
    let auth_header = req.headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthorized);
    }

    Ok(auth_header[7..].to_string())
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

// Implement FromRequestParts for ReporterContext
#[axum::async_trait]
impl<S> FromRequestParts<S> for ReporterContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<ReporterContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
