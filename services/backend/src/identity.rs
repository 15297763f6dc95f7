//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::{Authorization, Bearer};
use axum_extra::headers::HeaderMapExt;
use uuid::Uuid;

use crate::error::{AuthFailure, BackendError};
use crate::state::AppState;
use crate::usecase::token::validate_session_token;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header. Extraction fails with 401 when the header is absent, malformed,
/// or carries a token that does not validate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = BackendError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_owned());
        let secret = state.jwt_secret.clone();

        async move {
            let token =
                token.ok_or(BackendError::AuthenticationFailed(AuthFailure::InvalidToken))?;
            let claims = validate_session_token(&token, &secret)?;
            let user_id = claims
                .sub
                .parse::<Uuid>()
                .map_err(|_| BackendError::AuthenticationFailed(AuthFailure::InvalidToken))?;
            Ok(Self {
                user_id,
                email: claims.email,
            })
        }
    }
}
