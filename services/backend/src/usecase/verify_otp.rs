use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::{OtpPolicy, User};
use crate::error::{AuthFailure, BackendError};
use crate::usecase::code::digest_code;
use crate::usecase::token::issue_session_token;

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub token: String,
    pub user: User,
}

/// Validate a submitted code against the newest record for the email and,
/// on success, resolve (or lazily create) the account and mint a session
/// token.
///
/// The record's state is derived at call time, checked in a fixed order:
/// expiry first (an expired record fails closed no matter what), then the
/// attempt cap, then the spent flag, then the digest. Every write to the
/// record is a single conditional statement at the store — the attempt
/// counter through the atomic increment, the spend through a
/// compare-and-set on `verified` — so two concurrent calls with the
/// correct code can never both mint a token.
pub struct VerifyOtpUseCase<O, U>
where
    O: OtpRepository,
    U: UserRepository,
{
    pub otps: O,
    pub users: U,
    pub policy: OtpPolicy,
    pub jwt_secret: String,
    pub token_lifetime_secs: u64,
}

impl<O, U> VerifyOtpUseCase<O, U>
where
    O: OtpRepository,
    U: UserRepository,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, BackendError> {
        let record = self
            .otps
            .latest_for(&input.email)
            .await?
            .ok_or(BackendError::AuthenticationFailed(AuthFailure::NoRecord))?;

        let now = Utc::now();
        if now > record.expires_at {
            return Err(BackendError::AuthenticationFailed(AuthFailure::Expired));
        }

        if record.attempts >= self.policy.max_verification_attempts {
            return Err(BackendError::AuthenticationFailed(AuthFailure::Locked));
        }

        if record.verified {
            // Replaying a spent code still burns an attempt.
            self.otps.increment_attempts(record.id).await?;
            return Err(BackendError::AuthenticationFailed(
                AuthFailure::AlreadyVerified,
            ));
        }

        if digest_code(&input.code) != record.code_digest {
            // The increment lands before the error. Even when it reaches
            // the cap, this call still reports a mismatch; the lock shows
            // up on the next call.
            self.otps.increment_attempts(record.id).await?;
            return Err(BackendError::AuthenticationFailed(AuthFailure::Mismatch));
        }

        if !self.otps.mark_verified(record.id).await? {
            // The snapshot was unverified but the store row is already
            // spent: a concurrent call won the race. Treated exactly like
            // a replayed code.
            self.otps.increment_attempts(record.id).await?;
            return Err(BackendError::AuthenticationFailed(
                AuthFailure::AlreadyVerified,
            ));
        }

        let user = match self.users.find_by_email(&input.email).await? {
            Some(user) => user,
            None => {
                let user = User {
                    id: Uuid::new_v4(),
                    email: input.email.clone(),
                    onboarding_completed: false,
                    created_at: now,
                };
                self.users.create(&user).await?;
                user
            }
        };

        let token = issue_session_token(&user, &self.jwt_secret, self.token_lifetime_secs)?;
        Ok(VerifyOtpOutput { token, user })
    }
}
