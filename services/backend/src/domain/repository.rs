#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use skillstream_domain::feedback::Feedback;
use skillstream_domain::interest::Interest;

use crate::domain::types::{Content, OtpRecord, User, WatchProgress};
use crate::error::BackendError;

/// Store of issued one-time passcodes. Records are append-only except for
/// the `attempts` and `verified` columns.
pub trait OtpRepository: Send + Sync {
    async fn create(&self, record: &OtpRecord) -> Result<(), BackendError>;

    /// The newest record for an email (`created_at` descending, first).
    /// Older records are unreachable once superseded.
    async fn latest_for(&self, email: &str) -> Result<Option<OtpRecord>, BackendError>;

    /// All records for an email that have not been verified or spent.
    async fn all_unverified_for(&self, email: &str) -> Result<Vec<OtpRecord>, BackendError>;

    /// Records created after `since`, oldest first. Feeds the sliding
    /// rate-limit window.
    async fn created_after(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<OtpRecord>, BackendError>;

    /// Flip `verified` false→true at the store, conditionally: the update
    /// only matches a row that is still unverified. Returns whether this
    /// call made the transition — `false` means the record was already
    /// spent, so a concurrent caller won the race (or the code was
    /// replayed). Never touches `created_at` or the digest.
    async fn mark_verified(&self, id: Uuid) -> Result<bool, BackendError>;

    /// Add one to `attempts` atomically at the store, so two concurrent
    /// failed verifications never collapse into a single increment.
    async fn increment_attempts(&self, id: Uuid) -> Result<(), BackendError>;
}

/// Directory of user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BackendError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BackendError>;
    async fn create(&self, user: &User) -> Result<(), BackendError>;
    async fn mark_onboarded(&self, id: Uuid) -> Result<(), BackendError>;
}

/// Outbound delivery of plaintext one-time codes. Transport is swappable;
/// the shipped implementation logs to stdout.
pub trait EmailGateway: Send + Sync {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), BackendError>;
}

/// Source of fresh plaintext codes. Injected so tests can pin the code; the
/// production implementation draws from a CSPRNG.
pub trait CodeGenerator: Send + Sync {
    /// A fixed-width 6-digit decimal string, leading zeros preserved.
    fn six_digit_code(&self) -> String;
}

/// Read access to the content catalog.
pub trait ContentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, BackendError>;

    /// The next episode in `category` with an episode number above
    /// `after_episode`, if any.
    async fn next_episode(
        &self,
        category: &str,
        after_episode: i32,
    ) -> Result<Option<Content>, BackendError>;

    async fn find_by_categories(
        &self,
        categories: &[String],
        limit: u64,
    ) -> Result<Vec<Content>, BackendError>;

    async fn find_excluding_categories(
        &self,
        categories: &[String],
        limit: u64,
    ) -> Result<Vec<Content>, BackendError>;

    async fn find_any(&self, limit: u64) -> Result<Vec<Content>, BackendError>;
}

/// A user's interest selections.
pub trait UserInterestRepository: Send + Sync {
    /// Replace the user's selections wholesale (delete + insert, one
    /// transaction). Idempotent for a repeated identical selection.
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        interests: &[Interest],
    ) -> Result<(), BackendError>;

    async fn names_for_user(&self, user_id: Uuid) -> Result<Vec<String>, BackendError>;
}

/// Watch progress per (user, content) pair.
pub trait WatchHistoryRepository: Send + Sync {
    /// Insert or update keyed on (user, content).
    async fn upsert(&self, progress: &WatchProgress) -> Result<(), BackendError>;

    async fn find(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<Option<WatchProgress>, BackendError>;

    /// Record feedback on an existing history row. Returns `false` when the
    /// user has no history for the content.
    async fn set_feedback(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        feedback: Feedback,
    ) -> Result<bool, BackendError>;

    /// The most recently watched entry still below `below_percent`,
    /// joined with its content.
    async fn latest_in_progress(
        &self,
        user_id: Uuid,
        below_percent: i32,
    ) -> Result<Option<(WatchProgress, Content)>, BackendError>;
}
