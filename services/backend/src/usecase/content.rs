use uuid::Uuid;

use crate::domain::repository::ContentRepository;
use crate::domain::types::Content;
use crate::error::BackendError;

// ── GetContent ───────────────────────────────────────────────────────────────

pub struct GetContentUseCase<R: ContentRepository> {
    pub contents: R,
}

impl<R: ContentRepository> GetContentUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Content, BackendError> {
        self.contents
            .find_by_id(id)
            .await?
            .ok_or(BackendError::ContentNotFound)
    }
}

// ── NextEpisode ──────────────────────────────────────────────────────────────

pub struct NextEpisodeUseCase<R: ContentRepository> {
    pub contents: R,
}

impl<R: ContentRepository> NextEpisodeUseCase<R> {
    /// `None` when the content is not episodic or is the last episode of
    /// its category.
    pub async fn execute(&self, id: Uuid) -> Result<Option<Content>, BackendError> {
        let current = self
            .contents
            .find_by_id(id)
            .await?
            .ok_or(BackendError::ContentNotFound)?;

        let Some(episode) = current.episode_number else {
            return Ok(None);
        };
        self.contents.next_episode(&current.category, episode).await
    }
}
