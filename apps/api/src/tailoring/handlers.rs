//! Axum route handlers for the Tailoring API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifacts::{Artifact, ArtifactKind};
use crate::errors::AppError;
use crate::jobs::resolve_job_description;
use crate::resume::{extract_resume_text_async, UploadForm};
use crate::state::AppState;
use crate::tailoring::generator::{
    analyze_resume, generate_ats_keywords, generate_cover_letter, improve_resume_section,
    CoverLetterTarget,
};

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const JOB_URL_FIELD: &str = "job_url";
pub const COMPANY_NAME_FIELD: &str = "company_name";
pub const ROLE_TITLE_FIELD: &str = "role_title";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job_description: Option<String>,
    pub job_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImproveSectionRequest {
    pub section_text: String,
}

#[derive(Debug, Serialize)]
pub struct ArtifactResponse {
    pub artifact_id: Uuid,
    pub kind: ArtifactKind,
    pub file_name: &'static str,
    pub markdown: String,
    pub download_url: String,
}

impl From<Artifact> for ArtifactResponse {
    fn from(artifact: Artifact) -> Self {
        Self {
            artifact_id: artifact.id,
            kind: artifact.kind,
            file_name: artifact.kind.file_name(),
            download_url: format!("/api/v1/artifacts/{}", artifact.id),
            markdown: artifact.markdown,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor/analysis
///
/// Multipart: `resume` (PDF) plus `job_description` or `job_url`.
/// Returns the match analysis and a tailored resume as Markdown.
pub async fn handle_analysis(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ArtifactResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let resume_text = extract_resume_text_async(form.require_resume()?).await?;
    let job_description = resolve_job_description(
        &state.http,
        form.text(JOB_DESCRIPTION_FIELD),
        form.text(JOB_URL_FIELD),
    )
    .await?;

    let markdown = analyze_resume(state.llm.as_ref(), &resume_text, &job_description).await?;
    store(&state, ArtifactKind::Analysis, markdown).await
}

/// POST /api/v1/tailor/keywords
///
/// Needs only the job description, pasted or scraped.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<ArtifactResponse>, AppError> {
    let job_description = resolve_job_description(
        &state.http,
        request.job_description.as_deref(),
        request.job_url.as_deref(),
    )
    .await?;

    let markdown = generate_ats_keywords(state.llm.as_ref(), &job_description).await?;
    store(&state, ArtifactKind::AtsKeywords, markdown).await
}

/// POST /api/v1/tailor/improve-section
pub async fn handle_improve_section(
    State(state): State<AppState>,
    Json(request): Json<ImproveSectionRequest>,
) -> Result<Json<ArtifactResponse>, AppError> {
    let markdown = improve_resume_section(state.llm.as_ref(), &request.section_text).await?;
    store(&state, ArtifactKind::ImprovedSection, markdown).await
}

/// POST /api/v1/tailor/cover-letter
///
/// Multipart: `resume` (PDF), `job_description` or `job_url`, and optional
/// `company_name` / `role_title`.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ArtifactResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let resume_text = extract_resume_text_async(form.require_resume()?).await?;
    let job_description = resolve_job_description(
        &state.http,
        form.text(JOB_DESCRIPTION_FIELD),
        form.text(JOB_URL_FIELD),
    )
    .await?;

    let target = CoverLetterTarget {
        company_name: form.text(COMPANY_NAME_FIELD),
        role_title: form.text(ROLE_TITLE_FIELD),
    };
    let markdown =
        generate_cover_letter(state.llm.as_ref(), &resume_text, &job_description, &target).await?;
    store(&state, ArtifactKind::CoverLetter, markdown).await
}

async fn store(
    state: &AppState,
    kind: ArtifactKind,
    markdown: String,
) -> Result<Json<ArtifactResponse>, AppError> {
    let artifact = state.artifacts.insert(kind, markdown).await;
    Ok(Json(artifact.into()))
}
