use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::types::User;
use crate::error::{AuthFailure, BackendError};

/// JWT claims for a session token: subject is the user id, `email` rides
/// along so handlers can skip a directory lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mint an HS256 session token for a verified user.
pub fn issue_session_token(
    user: &User,
    secret: &str,
    lifetime_secs: u64,
) -> Result<String, BackendError> {
    let claims = SessionClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: now_secs() + lifetime_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BackendError::Internal(e.into()))
}

/// Validate signature and expiry, returning the claims. Any defect — bad
/// signature, expired `exp`, malformed token — reads as an authentication
/// failure, never a crash.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, BackendError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| BackendError::AuthenticationFailed(AuthFailure::InvalidToken))?;

    Ok(data.claims)
}
