use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::{CodeGenerator, EmailGateway, OtpRepository};
use crate::domain::types::{OtpPolicy, OtpRecord, validate_email};
use crate::error::BackendError;
use crate::usecase::code::digest_code;
use crate::usecase::rate_limit::{Admission, RequestRateLimiter};

pub struct IssueOtpInput {
    pub email: String,
}

/// Issue a fresh one-time code: throttle, spend any earlier live codes,
/// persist the digest of a new one, hand the plaintext to the mail gateway.
pub struct IssueOtpUseCase<O, E, G>
where
    O: OtpRepository,
    E: EmailGateway,
    G: CodeGenerator,
{
    pub otps: O,
    pub email_gateway: E,
    pub code_gen: G,
    pub policy: OtpPolicy,
}

impl<O, E, G> IssueOtpUseCase<O, E, G>
where
    O: OtpRepository,
    E: EmailGateway,
    G: CodeGenerator,
{
    pub async fn execute(&self, input: IssueOtpInput) -> Result<(), BackendError> {
        if !validate_email(&input.email) {
            return Err(BackendError::InvalidEmail);
        }

        let limiter = RequestRateLimiter {
            otps: &self.otps,
            policy: &self.policy,
        };
        if let Admission::Denied { retry_after_secs } = limiter.admit(&input.email).await? {
            return Err(BackendError::RateLimited { retry_after_secs });
        }

        // Spend every earlier live code so only the newest one can log in.
        // The conditional spend never touches created_at, so the rate-limit
        // window still counts these rows; a record verified concurrently in
        // the meantime is already in the state we want.
        for stale in self.otps.all_unverified_for(&input.email).await? {
            self.otps.mark_verified(stale.id).await?;
        }

        let code = self.code_gen.six_digit_code();
        let now = Utc::now();
        let record = OtpRecord {
            id: Uuid::new_v4(),
            email: input.email.clone(),
            code_digest: digest_code(&code),
            created_at: now,
            expires_at: now + Duration::minutes(self.policy.code_validity_minutes),
            attempts: 0,
            verified: false,
        };
        self.otps.create(&record).await?;

        self.email_gateway.send_otp(&input.email, &code).await?;
        Ok(())
    }
}
