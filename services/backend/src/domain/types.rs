use chrono::{DateTime, Utc};
use uuid::Uuid;

use skillstream_domain::feedback::Feedback;

/// One issued one-time passcode.
///
/// `code_digest` is fixed at creation; `attempts` only ever grows and
/// `verified` flips false→true at most once. A verified record is "spent" —
/// either consumed by a successful login or invalidated by a newer issuance.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: Uuid,
    pub email: String,
    pub code_digest: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub attempts: i32,
    pub verified: bool,
}

/// User account. Created lazily on first successful OTP verification.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Catalog entry: a standalone video or one episode of a series.
#[derive(Debug, Clone)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub category: String,
    pub episode_number: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Watch progress for one (user, content) pair.
#[derive(Debug, Clone)]
pub struct WatchProgress {
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub progress_percent: i32,
    pub last_watched_position: i32,
    pub feedback: Option<Feedback>,
    pub last_watched_at: DateTime<Utc>,
}

/// Homepage payload: the most recent unfinished watch plus two content rails.
#[derive(Debug, Clone)]
pub struct HomepageSections {
    pub continue_watching: Option<(WatchProgress, Content)>,
    pub recommended: Vec<Content>,
    pub exploration: Vec<Content>,
}

/// OTP issuance and verification tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    /// Sliding-window length for request throttling, in seconds.
    pub request_window_secs: i64,
    /// Requests admitted per window; the next one is denied.
    pub max_requests_per_window: usize,
    /// Extra cooldown after a full window, anchored to the oldest request.
    pub cooldown_minutes: i64,
    /// Failed verification calls before a code reads as locked.
    pub max_verification_attempts: i32,
    /// Code validity window, in minutes.
    pub code_validity_minutes: i64,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            request_window_secs: 90,
            max_requests_per_window: 3,
            cooldown_minutes: 2,
            max_verification_attempts: 5,
            code_validity_minutes: 5,
        }
    }
}

/// Minimal shape check: one `@` with non-empty local and domain parts and
/// no whitespace. Deliverability is the mail gateway's problem.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}
