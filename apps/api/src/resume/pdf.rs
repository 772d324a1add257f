//! PDF text extraction for uploaded resumes.
//!
//! Thin wrapper over `pdf-extract`: every page's text is concatenated, blank-line
//! runs are collapsed, and an empty result (scanned or image-only PDFs) is an error.

use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("file is not a PDF")]
    NotPdf,

    #[error("PDF contains no extractable text (is it a scanned image?)")]
    NoText,

    #[error("failed to extract text: {0}")]
    Extraction(String),
}

/// Returns true if the buffer starts with the PDF magic bytes.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Extracts plain text from PDF bytes held in memory.
///
/// Blocking and CPU-bound; async callers should use [`extract_resume_text_async`].
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, PdfError> {
    if !is_pdf(bytes) {
        return Err(PdfError::NotPdf);
    }

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(PdfError::NoText);
    }

    debug!("Extracted {} chars from {} byte PDF", text.len(), bytes.len());
    Ok(text)
}

/// Runs extraction on the blocking pool. `pdf-extract` panics on some malformed
/// files; a panic is reported as `PdfError::Extraction` instead of taking down the task.
pub async fn extract_resume_text_async(bytes: bytes::Bytes) -> Result<String, PdfError> {
    match tokio::task::spawn_blocking(move || extract_resume_text(&bytes)).await {
        Ok(result) => result,
        Err(join_error) => {
            warn!("PDF extraction task failed: {join_error}");
            Err(PdfError::Extraction(
                "the PDF could not be parsed".to_string(),
            ))
        }
    }
}

/// Trims trailing whitespace per line and collapses runs of blank lines into one.
fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}


#[cfg(test)]
mod tests {
    use super::test_support::pdf_with_text;
    use super::*;

    #[test]
    fn test_extracts_text_from_generated_pdf() {
        let bytes = pdf_with_text("Senior Rust Engineer");
        let text = extract_resume_text(&bytes).unwrap();
        assert!(text.contains("Senior Rust Engineer"), "got: {text:?}");
    }

    #[tokio::test]
    async fn test_async_extraction_matches_sync() {
        let bytes = pdf_with_text("Kubernetes");
        let text = extract_resume_text_async(bytes::Bytes::from(bytes))
            .await
            .unwrap();
        assert!(text.contains("Kubernetes"));
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = extract_resume_text(b"PK\x03\x04 this is a docx");
        assert!(matches!(result, Err(PdfError::NotPdf)));
    }

    #[test]
    fn test_truncated_pdf_is_an_error_not_a_panic() {
        let result = std::panic::catch_unwind(|| extract_resume_text(b"%PDF-1.4\n%garbage"));
        if let Ok(result) = result {
            assert!(result.is_err());
        }
    }

    #[tokio::test]
    async fn test_async_extraction_survives_malformed_pdf() {
        let result = extract_resume_text_async(bytes::Bytes::from_static(b"%PDF-1.7\n1 0 obj"))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_is_pdf_checks_magic() {
        assert!(is_pdf(b"%PDF-1.7\n"));
        assert!(!is_pdf(b"<html>"));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let raw = "\n\nJane Doe   \n\n\n\nExperience\n  \n\nSkills\n\n";
        assert_eq!(normalize_text(raw), "Jane Doe\n\nExperience\n\nSkills");
    }

    #[test]
    fn test_normalize_whitespace_only_is_empty() {
        assert_eq!(normalize_text(" \n\t\n  "), "");
    }
}
