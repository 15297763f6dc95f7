use crate::domain::types::OtpPolicy;

/// Backend configuration loaded from environment variables.
#[derive(Debug)]
pub struct BackendConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Required and non-empty —
    /// the service refuses to start without it.
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default 864000 = 10 days).
    /// Env var: `TOKEN_LIFETIME_SECS`.
    pub token_lifetime_secs: u64,
    /// OTP issuance and verification tuning knobs.
    pub otp: OtpPolicy,
    /// TCP port to listen on (default 8080). Env var: `BACKEND_PORT`.
    pub backend_port: u16,
}

impl BackendConfig {
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` or `JWT_SECRET` is missing, or if
    /// `JWT_SECRET` is empty. A backend that cannot sign verifiable
    /// tokens must not come up at all.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET");
        assert!(
            !jwt_secret.trim().is_empty(),
            "JWT_SECRET must not be empty"
        );

        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret,
            token_lifetime_secs: env_or("TOKEN_LIFETIME_SECS", 864_000),
            otp: OtpPolicy {
                request_window_secs: env_or("OTP_REQUEST_WINDOW_SECS", 90),
                max_requests_per_window: env_or("OTP_MAX_REQUESTS_PER_WINDOW", 3),
                cooldown_minutes: env_or("OTP_COOLDOWN_MINUTES", 2),
                max_verification_attempts: env_or("OTP_MAX_VERIFICATION_ATTEMPTS", 5),
                code_validity_minutes: env_or("OTP_CODE_VALIDITY_MINUTES", 5),
            },
            backend_port: env_or("BACKEND_PORT", 8080),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
