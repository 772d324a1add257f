//! Multipart form intake shared by every endpoint that accepts a resume upload.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Name of the file field carrying the resume PDF.
pub const RESUME_FIELD: &str = "resume";

/// A fully-read multipart form: the optional resume file plus every text field.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<Bytes>,
    pub resume_filename: Option<String>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == RESUME_FIELD {
                form.resume_filename = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!("Received resume upload ({} bytes)", data.len());
                form.resume = Some(data);
            } else if !name.is_empty() {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Returns the named text field, or `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Returns the resume bytes, rejecting a missing or empty upload.
    pub fn require_resume(&self) -> Result<Bytes, AppError> {
        match &self.resume {
            Some(bytes) if !bytes.is_empty() => Ok(bytes.clone()),
            _ => Err(AppError::Validation(format!(
                "A resume PDF must be uploaded in the '{RESUME_FIELD}' field"
            ))),
        }
    }

    #[cfg(test)]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
