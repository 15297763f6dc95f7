use chrono::Utc;
use uuid::Uuid;

use skillstream_domain::feedback::Feedback;

use crate::domain::repository::{ContentRepository, UserRepository, WatchHistoryRepository};
use crate::domain::types::WatchProgress;
use crate::error::BackendError;

pub struct SaveProgressInput {
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub progress_percent: i32,
    pub last_watched_position: i32,
}

/// Record how far a user got into a piece of content. One row per
/// (user, content); repeated saves overwrite.
pub struct SaveProgressUseCase<H, U, C>
where
    H: WatchHistoryRepository,
    U: UserRepository,
    C: ContentRepository,
{
    pub history: H,
    pub users: U,
    pub contents: C,
}

impl<H, U, C> SaveProgressUseCase<H, U, C>
where
    H: WatchHistoryRepository,
    U: UserRepository,
    C: ContentRepository,
{
    pub async fn execute(&self, input: SaveProgressInput) -> Result<(), BackendError> {
        if self.users.find_by_id(input.user_id).await?.is_none() {
            return Err(BackendError::UserNotFound);
        }
        if self.contents.find_by_id(input.content_id).await?.is_none() {
            return Err(BackendError::ContentNotFound);
        }

        let progress = WatchProgress {
            user_id: input.user_id,
            content_id: input.content_id,
            progress_percent: input.progress_percent.clamp(0, 100),
            last_watched_position: input.last_watched_position.max(0),
            feedback: None,
            last_watched_at: Utc::now(),
        };
        self.history.upsert(&progress).await
    }
}

pub struct GetProgressUseCase<H: WatchHistoryRepository> {
    pub history: H,
}

impl<H: WatchHistoryRepository> GetProgressUseCase<H> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<WatchProgress, BackendError> {
        self.history
            .find(user_id, content_id)
            .await?
            .ok_or(BackendError::ProgressNotFound)
    }
}

/// Attach helpful / not-helpful feedback to an existing history row.
pub struct SaveFeedbackUseCase<H: WatchHistoryRepository> {
    pub history: H,
}

impl<H: WatchHistoryRepository> SaveFeedbackUseCase<H> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        feedback: &str,
    ) -> Result<(), BackendError> {
        let feedback = Feedback::parse(feedback).ok_or(BackendError::InvalidFeedback)?;
        let updated = self.history.set_feedback(user_id, content_id, feedback).await?;
        if !updated {
            return Err(BackendError::ProgressNotFound);
        }
        Ok(())
    }
}
