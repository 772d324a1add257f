use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::{extract_resume_text_async, UploadForm};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub char_count: usize,
}

/// POST /api/v1/resume/extract
///
/// Returns the plain text of the uploaded resume so the user can check what the model will see.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let bytes = form.require_resume()?;

    let text = extract_resume_text_async(bytes).await?;
    let char_count = text.chars().count();
    info!(
        "Extracted {} chars from {}",
        char_count,
        form.resume_filename.as_deref().unwrap_or("upload")
    );

    Ok(Json(ExtractResponse { text, char_count }))
}
