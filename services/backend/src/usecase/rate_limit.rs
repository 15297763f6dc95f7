use chrono::{Duration, Utc};

use crate::domain::repository::OtpRepository;
use crate::domain::types::OtpPolicy;
use crate::error::BackendError;

/// Outcome of a rate-limit check for one code request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Denied { retry_after_secs: u64 },
}

/// Sliding-window throttle over code *requests* per email.
///
/// The window is recomputed from `otp_verifications.created_at` on every
/// call — there is no separate counter to drift. Once a full window of
/// requests exists, the cooldown is anchored to the *oldest* request in the
/// window, so the lockout ends at a fixed instant no matter how densely the
/// burst arrived.
pub struct RequestRateLimiter<'a, O: OtpRepository> {
    pub otps: &'a O,
    pub policy: &'a OtpPolicy,
}

impl<O: OtpRepository> RequestRateLimiter<'_, O> {
    pub async fn admit(&self, email: &str) -> Result<Admission, BackendError> {
        let now = Utc::now();
        let window_start = now - Duration::seconds(self.policy.request_window_secs);
        let recent = self.otps.created_after(email, window_start).await?;

        // The cap itself is the trigger: the request *after* the window
        // fills is the first one denied.
        if recent.len() < self.policy.max_requests_per_window {
            return Ok(Admission::Allowed);
        }

        // Guards a cap of 0: the window is full and empty at once, and
        // there is no oldest request to anchor a cooldown to.
        let Some(first) = recent.first() else {
            return Ok(Admission::Allowed);
        };
        let oldest = first.created_at;
        let cooldown_end = oldest
            + Duration::seconds(self.policy.request_window_secs)
            + Duration::minutes(self.policy.cooldown_minutes);

        if now >= cooldown_end {
            // The window has rolled over; the burst no longer counts.
            return Ok(Admission::Allowed);
        }

        let retry_after_secs = (cooldown_end - now).num_seconds().max(1) as u64;
        Ok(Admission::Denied { retry_after_secs })
    }
}
