use sea_orm::Database;
use tracing::info;

use skillstream_backend::config::BackendConfig;
use skillstream_backend::router::build_router;
use skillstream_backend::state::AppState;
use skillstream_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = BackendConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        token_lifetime_secs: config.token_lifetime_secs,
        otp_policy: config.otp,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.backend_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("backend listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
