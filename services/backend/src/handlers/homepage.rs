use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::BackendError;
use crate::handlers::content::ContentResponse;
use crate::identity::CurrentUser;
use crate::state::AppState;
use crate::usecase::homepage::GetHomepageUseCase;

#[derive(Serialize)]
pub struct ContinueWatchingResponse {
    pub content: ContentResponse,
    pub progress_percent: i32,
    pub last_watched_position: i32,
}

#[derive(Serialize)]
pub struct HomepageResponse {
    pub continue_watching: Option<ContinueWatchingResponse>,
    pub recommended: Vec<ContentResponse>,
    pub exploration: Vec<ContentResponse>,
}

// ── GET /api/homepage ────────────────────────────────────────────────────────

pub async fn get_homepage(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<HomepageResponse>, BackendError> {
    let usecase = GetHomepageUseCase {
        history: state.history_repo(),
        interests: state.interest_repo(),
        contents: state.content_repo(),
    };
    let sections = usecase.execute(current.user_id).await?;

    Ok(Json(HomepageResponse {
        continue_watching: sections.continue_watching.map(|(progress, content)| {
            ContinueWatchingResponse {
                content: content.into(),
                progress_percent: progress.progress_percent,
                last_watched_position: progress.last_watched_position,
            }
        }),
        recommended: sections.recommended.into_iter().map(Into::into).collect(),
        exploration: sections.exploration.into_iter().map(Into::into).collect(),
    }))
}
