// Job description intake: pasted text or a scraped posting page.

pub mod handlers;
pub mod scrape;
pub mod sites;

use reqwest::Client;

use crate::errors::AppError;

pub use scrape::{fetch_job_description, ScrapeError, ScrapedJob};

/// Resolves the job description for a tailoring request.
///
/// Pasted text wins when present; otherwise the URL is scraped. Having neither is a
/// validation error.
pub async fn resolve_job_description(
    client: &Client,
    pasted: Option<&str>,
    job_url: Option<&str>,
) -> Result<String, AppError> {
    if let Some(text) = pasted.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(text.to_string());
    }

    match job_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => Ok(fetch_job_description(client, url).await?.description),
        None => Err(AppError::Validation(
            "Provide a job_description or a job_url to scrape".to_string(),
        )),
    }
}
