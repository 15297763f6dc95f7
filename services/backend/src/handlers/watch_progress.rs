use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::WatchProgress;
use crate::error::BackendError;
use crate::identity::CurrentUser;
use crate::state::AppState;
use crate::usecase::watch_progress::{
    GetProgressUseCase, SaveFeedbackUseCase, SaveProgressInput, SaveProgressUseCase,
};

#[derive(Serialize)]
pub struct ProgressResponse {
    pub content_id: String,
    pub progress_percent: i32,
    pub last_watched_position: i32,
    pub feedback: Option<&'static str>,
    #[serde(serialize_with = "skillstream_core::serde::to_rfc3339_ms")]
    pub last_watched_at: chrono::DateTime<chrono::Utc>,
}

impl From<WatchProgress> for ProgressResponse {
    fn from(progress: WatchProgress) -> Self {
        Self {
            content_id: progress.content_id.to_string(),
            progress_percent: progress.progress_percent,
            last_watched_position: progress.last_watched_position,
            feedback: progress.feedback.map(|f| f.name()),
            last_watched_at: progress.last_watched_at,
        }
    }
}

// ── PUT /api/watch-progress ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveProgressRequest {
    pub content_id: Uuid,
    pub progress_percent: i32,
    pub last_watched_position: i32,
}

pub async fn save_progress(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<SaveProgressRequest>,
) -> Result<StatusCode, BackendError> {
    let usecase = SaveProgressUseCase {
        history: state.history_repo(),
        users: state.user_repo(),
        contents: state.content_repo(),
    };
    usecase
        .execute(SaveProgressInput {
            user_id: current.user_id,
            content_id: body.content_id,
            progress_percent: body.progress_percent,
            last_watched_position: body.last_watched_position,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/watch-progress/{content_id} ─────────────────────────────────────

pub async fn get_progress(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, BackendError> {
    let usecase = GetProgressUseCase {
        history: state.history_repo(),
    };
    let progress = usecase.execute(current.user_id, content_id).await?;
    Ok(Json(progress.into()))
}

// ── PUT /api/watch-progress/feedback ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveFeedbackRequest {
    pub content_id: Uuid,
    pub feedback: String,
}

pub async fn save_feedback(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<SaveFeedbackRequest>,
) -> Result<StatusCode, BackendError> {
    let usecase = SaveFeedbackUseCase {
        history: state.history_repo(),
    };
    usecase
        .execute(current.user_id, body.content_id, &body.feedback)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
