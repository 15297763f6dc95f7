use tracing::info;

use crate::domain::repository::EmailGateway;
use crate::error::BackendError;

/// Development mail transport: writes the code to the log instead of
/// sending anything. Swap this out at the `EmailGateway` seam to wire up a
/// real provider.
#[derive(Clone, Copy, Default)]
pub struct LogEmailGateway;

impl EmailGateway for LogEmailGateway {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), BackendError> {
        info!(%email, %code, "OTP issued (log transport)");
        Ok(())
    }
}
