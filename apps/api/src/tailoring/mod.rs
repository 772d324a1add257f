// Tailoring: analysis, ATS keywords, section improvement and cover letters.
// All LLM calls go through llm_client::TextGenerator — never a direct HTTP call here.

pub mod generator;
pub mod handlers;
pub mod prompts;
