// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.

/// Output-format instruction shared by every tailoring prompt.
pub const MARKDOWN_ONLY_INSTRUCTION: &str = "\
    Respond in GitHub-flavored Markdown only. \
    Use `##` headings for sections and `-` for bullet lists. \
    Do NOT wrap the whole response in a code fence. \
    Do NOT add a preamble such as 'Sure, here is'.";

/// Instruction against inventing experience the candidate doesn't have.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Never invent employers, dates, degrees, certifications, or metrics that are not \
    present in the material provided. When a number would help but is unknown, \
    write a bracketed placeholder such as [X%] for the candidate to fill in.";
