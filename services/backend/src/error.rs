use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Internal reason a verification was rejected. Logged server-side but never
/// surfaced in the response body — every failure reads the same to the
/// caller so the API leaks nothing about which check tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No code was ever issued for this email.
    NoRecord,
    /// The newest code's validity window has passed.
    Expired,
    /// The attempt cap on the newest code has been reached.
    Locked,
    /// The newest code was already used (or spent by a later issuance).
    AlreadyVerified,
    /// The submitted code does not match the stored digest.
    Mismatch,
    /// The bearer token failed signature or expiry validation.
    InvalidToken,
}

impl AuthFailure {
    pub fn reason(self) -> &'static str {
        match self {
            Self::NoRecord => "no record",
            Self::Expired => "expired",
            Self::Locked => "locked",
            Self::AlreadyVerified => "already verified",
            Self::Mismatch => "mismatch",
            Self::InvalidToken => "invalid token",
        }
    }
}

/// Backend domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("too many code requests")]
    RateLimited { retry_after_secs: u64 },
    #[error("authentication failed")]
    AuthenticationFailed(AuthFailure),
    #[error("user not found")]
    UserNotFound,
    #[error("content not found")]
    ContentNotFound,
    #[error("watch progress not found")]
    ProgressNotFound,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid interest names: {0}")]
    InvalidInterests(String),
    #[error("invalid feedback")]
    InvalidFeedback,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ContentNotFound => "CONTENT_NOT_FOUND",
            Self::ProgressNotFound => "PROGRESS_NOT_FOUND",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidInterests(_) => "INVALID_INTERESTS",
            Self::InvalidFeedback => "INVALID_FEEDBACK",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::ContentNotFound | Self::ProgressNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidEmail
            | Self::InvalidInterests(_)
            | Self::InvalidFeedback
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. The one exception is authentication failures: their
        // body is deliberately generic, so the precise reason goes to the log.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::AuthenticationFailed(failure) => {
                tracing::warn!(reason = failure.reason(), "authentication failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let mut response = (status, axum::Json(body)).into_response();
        if let Self::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}
