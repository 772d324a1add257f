use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/artifacts/:id
///
/// Serves a generated output as a Markdown file download under its fixed name.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let artifact = state
        .artifacts
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Artifact {id} not found or expired")))?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.kind.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.markdown,
    ))
}
