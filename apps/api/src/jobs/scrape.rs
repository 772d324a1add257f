//! Job description scraping: fetch a posting page and pull its description text out.
//!
//! Flow: validate URL → GET page → identify site → site extractor → generic fallback.
//! No retry and no rate limiting; a failure is reported to the caller as-is.

use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::jobs::sites::{extractor_for, JobPageExtractor, JobSite, GENERIC};

/// Descriptions longer than this are cut before they reach a prompt.
pub const MAX_DESCRIPTION_CHARS: usize = 20_000;

/// Bytes read from a job page before the rest of the body is discarded.
pub const MAX_PAGE_BYTES: usize = 5 * 1024 * 1024;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid job URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no job description found at {url}")]
    DescriptionNotFound { url: String },
}

/// A job description pulled from a posting page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedJob {
    pub url: String,
    pub site: JobSite,
    pub description: String,
}

/// Builds the HTTP client used for page fetches.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Parses and checks that the URL is an absolute http(s) URL.
pub fn parse_job_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw.trim()).map_err(|e| ScrapeError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ScrapeError::InvalidUrl(format!(
            "{raw}: only http and https URLs are supported"
        ))),
    }
}

/// Fetches a job posting page and extracts its description.
pub async fn fetch_job_description(
    client: &Client,
    raw_url: &str,
) -> Result<ScrapedJob, ScrapeError> {
    let url = parse_job_url(raw_url)?;
    info!("Fetching job description from {url}");

    let response = client
        .get(url.clone())
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = read_body_limited(response, MAX_PAGE_BYTES).await?;
    debug!("Fetched {} bytes from {url}", html.len());

    extract_description(&url, &html)
}

/// Reads at most `limit` bytes of the body, chunk by chunk.
async fn read_body_limited(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<String, ScrapeError> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            debug!("Page body reached {limit} bytes, ignoring the rest");
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Extracts the description from an already-fetched page.
///
/// The site-specific extractor runs first; if the site is unknown or its markup
/// no longer matches, the generic extractor gets a turn.
pub fn extract_description(url: &Url, html: &str) -> Result<ScrapedJob, ScrapeError> {
    let site = JobSite::from_url(url);
    let document = Html::parse_document(html);

    let from_site = extractor_for(site).and_then(|extractor| {
        debug!("Trying {:?} selectors for {url}", extractor.site());
        extractor.extract(&document)
    });
    let description = match from_site {
        Some(text) => Some(text),
        None => {
            if site != JobSite::Generic {
                debug!("{site:?} selectors found nothing at {url}, trying generic extraction");
            }
            GENERIC.extract(&document)
        }
    };

    let description = description.ok_or_else(|| ScrapeError::DescriptionNotFound {
        url: url.to_string(),
    })?;

    info!(
        "Extracted {} chars of job description ({site:?})",
        description.chars().count()
    );

    Ok(ScrapedJob {
        url: url.to_string(),
        site,
        description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
    })
}

fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Html as HtmlBody;
    use axum::routing::get;
    use axum::Router;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    const LINKEDIN_PAGE: &str = r#"<!DOCTYPE html>
        <html><head><title>Senior Rust Engineer | Acme | LinkedIn</title></head>
        <body>
          <h1 class="top-card-layout__title">Senior Rust Engineer</h1>
          <div class="description__text description__text--rich">
            <section class="show-more-less-html">
              <div class="show-more-less-html__markup">
                <p>We are looking for a <strong>Senior Rust Engineer</strong> to build our ingestion platform.</p>
                <ul><li>5+ years of backend experience</li><li>Tokio and async Rust</li></ul>
              </div>
            </section>
          </div>
        </body></html>"#;

    const INDEED_PAGE: &str = r#"<html><body>
        <div id="jobDescriptionText" class="jobsearch-jobDescriptionText">
          <p>Data Engineer needed.</p><p>Experience with Spark &amp; Airflow.</p>
        </div></body></html>"#;

    const GLASSDOOR_PAGE: &str = r#"<html><body>
        <div class="JobDetails_jobDescription__6VeBn JobDetails_blurDescription__fRQYh">
          <div><p>Own our analytics stack.</p><p>SQL and dbt required.</p></div>
        </div></body></html>"#;

    const GREENHOUSE_PAGE: &str = r#"<html><body>
        <div id="app_body"><div id="content">
          <p>We build developer tools.</p><ul><li>Go</li><li>Postgres</li></ul>
        </div></div></body></html>"#;

    const LEVER_PAGE: &str = r#"<html><body>
        <div class="section-wrapper page-full-width">
          <div data-qa="job-description"><p>Join our platform team.</p></div>
        </div></body></html>"#;

    #[test]
    fn test_linkedin_selector_text_is_returned() {
        let job = extract_description(&url("https://www.linkedin.com/jobs/view/42"), LINKEDIN_PAGE)
            .unwrap();
        assert_eq!(job.site, JobSite::LinkedIn);
        assert_eq!(
            job.description,
            "We are looking for a Senior Rust Engineer to build our ingestion platform.\n\
             - 5+ years of backend experience\n\
             - Tokio and async Rust"
        );
    }

    #[test]
    fn test_indeed_selector_decodes_entities() {
        let job = extract_description(&url("https://www.indeed.com/viewjob?jk=1"), INDEED_PAGE)
            .unwrap();
        assert_eq!(job.site, JobSite::Indeed);
        assert_eq!(
            job.description,
            "Data Engineer needed.\nExperience with Spark & Airflow."
        );
    }

    #[test]
    fn test_glassdoor_falls_back_to_hashed_class_selector() {
        let job = extract_description(
            &url("https://www.glassdoor.com/job-listing/data-analyst-JV_IC1.htm?jl=1"),
            GLASSDOOR_PAGE,
        )
        .unwrap();
        assert_eq!(job.site, JobSite::Glassdoor);
        assert_eq!(
            job.description,
            "Own our analytics stack.\nSQL and dbt required."
        );
    }

    #[test]
    fn test_greenhouse_content_selector() {
        let job = extract_description(
            &url("https://boards.greenhouse.io/acme/jobs/4012"),
            GREENHOUSE_PAGE,
        )
        .unwrap();
        assert_eq!(job.site, JobSite::Greenhouse);
        assert_eq!(
            job.description,
            "We build developer tools.\n- Go\n- Postgres"
        );
    }

    #[test]
    fn test_lever_prefers_data_qa_selector() {
        let job = extract_description(&url("https://jobs.lever.co/acme/abc"), LEVER_PAGE).unwrap();
        assert_eq!(job.site, JobSite::Lever);
        assert_eq!(job.description, "Join our platform team.");
    }

    #[test]
    fn test_unknown_site_uses_description_container_fallback() {
        let page = r#"<html><body><div class="careers-job-description">
            <p>Own the billing service end to end.</p></div></body></html>"#;
        let job = extract_description(&url("https://careers.acme.com/jobs/7"), page).unwrap();
        assert_eq!(job.site, JobSite::Generic);
        assert_eq!(job.description, "Own the billing service end to end.");
    }

    #[test]
    fn test_known_site_with_changed_markup_falls_back_to_generic() {
        let page = r#"<html><body><article id="jobDescription">
            <p>Markup moved but the posting is still here.</p></article></body></html>"#;
        let job = extract_description(&url("https://www.linkedin.com/jobs/view/9"), page).unwrap();
        assert_eq!(job.site, JobSite::LinkedIn);
        assert_eq!(job.description, "Markup moved but the posting is still here.");
    }

    #[test]
    fn test_unrecognized_markup_is_description_not_found() {
        let page = "<html><body><p>Page not found</p></body></html>";
        let result = extract_description(&url("https://careers.acme.com/jobs/7"), page);
        assert!(matches!(result, Err(ScrapeError::DescriptionNotFound { .. })));
    }

    #[test]
    fn test_description_is_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_DESCRIPTION_CHARS + 50);
        let page = format!(r#"<html><body><div id="jobDescriptionText">{long}</div></body></html>"#);
        let job = extract_description(&url("https://www.indeed.com/viewjob"), &page).unwrap();
        assert_eq!(job.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_parse_job_url_rejects_non_http() {
        assert!(matches!(
            parse_job_url("ftp://example.com/job"),
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_job_url("not a url"),
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(parse_job_url("  https://jobs.lever.co/acme/1  ").is_ok());
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url_before_network() {
        let client = build_http_client(Duration::from_secs(1)).unwrap();
        let result = fetch_job_description(&client, "file:///etc/passwd").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_http_error() {
        let client = build_http_client(Duration::from_secs(2)).unwrap();
        // Port 9 on loopback is the discard service; nothing listens there in CI.
        let result = fetch_job_description(&client, "http://127.0.0.1:9/job").await;
        assert!(matches!(result, Err(ScrapeError::Http(_))));
    }

    /// Serves `app` on an ephemeral loopback port and returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_extracts_description_from_served_page() {
        let base = serve(Router::new().route("/jobs/7", get(|| async { HtmlBody(INDEED_PAGE) })))
            .await;
        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let job = fetch_job_description(&client, &format!("{base}/jobs/7"))
            .await
            .unwrap();
        assert_eq!(job.site, JobSite::Generic);
        assert!(job.description.contains("Spark & Airflow"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_status_error() {
        let base = serve(Router::new().route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, "expired posting") }),
        ))
        .await;
        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let result = fetch_job_description(&client, &format!("{base}/gone")).await;
        assert!(matches!(
            result,
            Err(ScrapeError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_page_body_is_read_up_to_the_limit() {
        let base = serve(Router::new().route("/big", get(|| async { "x".repeat(10_000) }))).await;
        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let response = client.get(format!("{base}/big")).send().await.unwrap();
        let body = read_body_limited(response, 1_000).await.unwrap();
        assert_eq!(body.len(), 1_000);
    }
}
