//! Tailoring operations — one prompt, one LLM call, one Markdown result each.
//!
//! Every operation validates its inputs, fills its template, calls the
//! `TextGenerator`, and returns the text with any wrapping code fence removed.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{MARKDOWN_ONLY_INSTRUCTION, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::tailoring::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, ATS_EXPERT_SYSTEM, ATS_KEYWORDS_PROMPT_TEMPLATE,
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, DEFAULT_COMPANY_NAME, DEFAULT_ROLE_TITLE,
    IMPROVE_SECTION_PROMPT_TEMPLATE, RESUME_CONSULTANT_SYSTEM,
};

/// Optional context for a cover letter.
#[derive(Debug, Clone, Default)]
pub struct CoverLetterTarget<'a> {
    pub company_name: Option<&'a str>,
    pub role_title: Option<&'a str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt builders (pure — unit tested without an LLM)
// ────────────────────────────────────────────────────────────────────────────

pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text.trim()),
            ("job_description", job_description.trim()),
            ("format_instruction", MARKDOWN_ONLY_INSTRUCTION),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
        ],
    )
}

pub fn build_ats_keywords_prompt(job_description: &str) -> String {
    fill_template(
        ATS_KEYWORDS_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description.trim()),
            ("format_instruction", MARKDOWN_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_improve_section_prompt(section_text: &str) -> String {
    fill_template(
        IMPROVE_SECTION_PROMPT_TEMPLATE,
        &[
            ("section_text", section_text.trim()),
            ("format_instruction", MARKDOWN_ONLY_INSTRUCTION),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
        ],
    )
}

pub fn build_cover_letter_prompt(
    resume_text: &str,
    job_description: &str,
    target: &CoverLetterTarget<'_>,
) -> String {
    let company_name = non_blank(target.company_name).unwrap_or(DEFAULT_COMPANY_NAME);
    let role_title = non_blank(target.role_title).unwrap_or(DEFAULT_ROLE_TITLE);

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text.trim()),
            ("job_description", job_description.trim()),
            ("company_name", company_name),
            ("role_title", role_title),
            ("format_instruction", MARKDOWN_ONLY_INSTRUCTION),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Scores the resume against the job and returns a tailored rewrite with suggestions.
pub async fn analyze_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_description: &str,
) -> Result<String, AppError> {
    require("resume text", resume_text)?;
    require("job_description", job_description)?;

    info!(
        "Analyzing resume ({} chars) against job description ({} chars)",
        resume_text.len(),
        job_description.len()
    );
    let prompt = build_analysis_prompt(resume_text, job_description);
    generate(llm, &prompt, RESUME_CONSULTANT_SYSTEM, "resume analysis").await
}

/// Lists the skills, qualifications and keywords an ATS will look for.
pub async fn generate_ats_keywords(
    llm: &dyn TextGenerator,
    job_description: &str,
) -> Result<String, AppError> {
    require("job_description", job_description)?;

    info!("Generating ATS keywords");
    let prompt = build_ats_keywords_prompt(job_description);
    generate(llm, &prompt, ATS_EXPERT_SYSTEM, "keyword generation").await
}

/// Rewrites a single resume section with stronger verbs and quantified impact.
pub async fn improve_resume_section(
    llm: &dyn TextGenerator,
    section_text: &str,
) -> Result<String, AppError> {
    require("section_text", section_text)?;

    info!("Improving resume section ({} chars)", section_text.len());
    let prompt = build_improve_section_prompt(section_text);
    generate(llm, &prompt, RESUME_CONSULTANT_SYSTEM, "section improvement").await
}

/// Drafts a cover letter from the resume and job description.
pub async fn generate_cover_letter(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_description: &str,
    target: &CoverLetterTarget<'_>,
) -> Result<String, AppError> {
    require("resume text", resume_text)?;
    require("job_description", job_description)?;

    info!(
        "Generating cover letter (company={:?}, role={:?})",
        target.company_name, target.role_title
    );
    let prompt = build_cover_letter_prompt(resume_text, job_description, target);
    generate(llm, &prompt, COVER_LETTER_SYSTEM, "cover letter generation").await
}

async fn generate(
    llm: &dyn TextGenerator,
    prompt: &str,
    system: &str,
    what: &str,
) -> Result<String, AppError> {
    let text = llm
        .generate(prompt, system)
        .await
        .map_err(|e| AppError::Llm(format!("{what} failed: {e}")))?;

    let markdown = strip_markdown_fence(&text);
    if markdown.is_empty() {
        return Err(AppError::Llm(format!("{what} returned no text")));
    }
    Ok(markdown.to_string())
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Fills `{key}` markers in a single pass, so text substituted in is never rescanned.
/// Unknown markers are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replacement = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });

        match replacement {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Strips a ```markdown / ```md / ``` fence when the model wraps the whole reply in one.
fn strip_markdown_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = body.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. `markdown`) on the opening line.
    match body.split_once('\n') {
        Some((info, rest)) if !info.contains(' ') => rest.trim(),
        _ => body.trim(),
    }
}
