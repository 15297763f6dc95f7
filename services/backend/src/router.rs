use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use skillstream_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{get_me, login, logout, request_otp},
    content::{get_content, next_episode},
    health::{healthz, readyz},
    homepage::get_homepage,
    interest::{get_interests, save_interests},
    watch_progress::{get_progress, save_feedback, save_progress},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/otp", post(request_otp))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/logout", post(logout))
        // Catalog
        .route("/api/contents/{id}", get(get_content))
        .route("/api/contents/{id}/next-episode", get(next_episode))
        // Interests
        .route("/api/interests", get(get_interests))
        .route("/api/user/interests", post(save_interests))
        // Watch progress
        .route("/api/watch-progress", put(save_progress))
        .route("/api/watch-progress/feedback", put(save_feedback))
        .route("/api/watch-progress/{content_id}", get(get_progress))
        // Homepage
        .route("/api/homepage", get(get_homepage))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
