use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::identity::CurrentUser;
use crate::state::AppState;
use crate::usecase::interest::{SaveInterestsUseCase, list_interests};

// ── GET /api/interests ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InterestOptionResponse {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub icon_name: &'static str,
}

pub async fn get_interests() -> Json<Vec<InterestOptionResponse>> {
    let options = list_interests()
        .iter()
        .map(|interest| InterestOptionResponse {
            name: interest.name(),
            display_name: interest.display_name(),
            description: interest.description(),
            icon_name: interest.icon_name(),
        })
        .collect();
    Json(options)
}

// ── POST /api/user/interests ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveInterestsRequest {
    pub interests: Vec<String>,
}

pub async fn save_interests(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<SaveInterestsRequest>,
) -> Result<StatusCode, BackendError> {
    let usecase = SaveInterestsUseCase {
        interests: state.interest_repo(),
        users: state.user_repo(),
    };
    usecase.execute(current.user_id, &body.interests).await?;
    Ok(StatusCode::NO_CONTENT)
}
