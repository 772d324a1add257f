use std::sync::Arc;

use reqwest::Client;

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: the Gemini `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Client for job page fetches, with the scrape timeout and browser User-Agent.
    pub http: Client,
    /// Recently generated outputs, kept for download.
    pub artifacts: ArtifactStore,
    pub config: Config,
}
