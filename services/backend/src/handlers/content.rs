use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Content;
use crate::error::BackendError;
use crate::state::AppState;
use crate::usecase::content::{GetContentUseCase, NextEpisodeUseCase};

#[derive(Serialize)]
pub struct ContentResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub category: String,
    pub episode_number: Option<i32>,
    pub duration_seconds: Option<i32>,
    #[serde(serialize_with = "skillstream_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Content> for ContentResponse {
    fn from(content: Content) -> Self {
        Self {
            id: content.id.to_string(),
            title: content.title,
            description: content.description,
            thumbnail_url: content.thumbnail_url,
            video_url: content.video_url,
            category: content.category,
            episode_number: content.episode_number,
            duration_seconds: content.duration_seconds,
            created_at: content.created_at,
        }
    }
}

// ── GET /api/contents/{id} ───────────────────────────────────────────────────

pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, BackendError> {
    let usecase = GetContentUseCase {
        contents: state.content_repo(),
    };
    let content = usecase.execute(id).await?;
    Ok(Json(content.into()))
}

// ── GET /api/contents/{id}/next-episode ──────────────────────────────────────

pub async fn next_episode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, BackendError> {
    let usecase = NextEpisodeUseCase {
        contents: state.content_repo(),
    };
    match usecase.execute(id).await? {
        Some(next) => Ok(Json(ContentResponse::from(next)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
