use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::identity::CurrentUser;
use crate::state::AppState;
use crate::usecase::issue_otp::{IssueOtpInput, IssueOtpUseCase};
use crate::usecase::user::GetUserUseCase;
use crate::usecase::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub onboarding_completed: bool,
    #[serde(serialize_with = "skillstream_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::User> for UserResponse {
    fn from(user: crate::domain::types::User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            onboarding_completed: user.onboarding_completed,
            created_at: user.created_at,
        }
    }
}

// ── POST /api/auth/otp ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub email: String,
}

pub async fn request_otp(
    State(state): State<AppState>,
    Json(body): Json<RequestOtpRequest>,
) -> Result<StatusCode, BackendError> {
    let usecase = IssueOtpUseCase {
        otps: state.otp_repo(),
        email_gateway: state.email_gateway(),
        code_gen: state.code_gen(),
        policy: state.otp_policy,
    };
    usecase.execute(IssueOtpInput { email: body.email }).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let usecase = VerifyOtpUseCase {
        otps: state.otp_repo(),
        users: state.user_repo(),
        policy: state.otp_policy,
        jwt_secret: state.jwt_secret.clone(),
        token_lifetime_secs: state.token_lifetime_secs,
    };
    let out = usecase
        .execute(VerifyOtpInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: out.token,
        user: out.user.into(),
    }))
}

// ── GET /api/auth/me ─────────────────────────────────────────────────────────

pub async fn get_me(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, BackendError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(current.user_id).await?;
    Ok(Json(user.into()))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

/// Sessions are stateless JWTs; the server has nothing to revoke. The
/// endpoint exists so clients have a uniform logout call, and it accepts
/// any caller — a client holding an expired token must still be able to
/// log out.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}
