pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::artifacts::handlers as artifacts;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Inputs
        .route("/api/v1/resume/extract", post(resume::handle_extract))
        .route("/api/v1/jobs/scrape", post(jobs::handle_scrape))
        // Generation
        .route("/api/v1/tailor/analysis", post(tailoring::handle_analysis))
        .route("/api/v1/tailor/keywords", post(tailoring::handle_keywords))
        .route(
            "/api/v1/tailor/improve-section",
            post(tailoring::handle_improve_section),
        )
        .route(
            "/api/v1/tailor/cover-letter",
            post(tailoring::handle_cover_letter),
        )
        // Downloads
        .route("/api/v1/artifacts/:id", get(artifacts::handle_download))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
