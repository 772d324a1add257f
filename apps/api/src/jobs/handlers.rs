use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::{fetch_job_description, ScrapedJob};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// POST /api/v1/jobs/scrape
///
/// Fetches a job posting and returns the extracted description so it can be reviewed
/// or edited before tailoring.
pub async fn handle_scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapedJob>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let job = fetch_job_description(&state.http, &request.url).await?;
    Ok(Json(job))
}
