// All LLM prompt constants for the tailoring module.
// Templates use `{placeholder}` markers that are filled by `generator::fill_template`.

/// System prompt shared by resume analysis and section improvement.
pub const RESUME_CONSULTANT_SYSTEM: &str = "You are an expert ATS (Applicant Tracking System) \
    and resume consultant. You give specific, actionable feedback grounded in the \
    documents you are shown.";

/// System prompt for keyword extraction.
pub const ATS_EXPERT_SYSTEM: &str = "You are an ATS expert who knows how applicant tracking \
    systems parse and rank resumes against a job description.";

/// System prompt for cover letters.
pub const COVER_LETTER_SYSTEM: &str = "You are a professional career writer who drafts concise, \
    specific cover letters in a confident but natural voice.";

/// Resume analysis prompt template.
/// Replace: {resume_text}, {job_description}, {format_instruction}, {no_fabrication}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Please provide:
1. A relevance score (0-100%)
2. Key matching skills and experiences
3. Missing key requirements
4. A tailored version of the resume optimized for this role
5. Specific suggestions for improvement

Format the response in clear sections with markdown headings.

{format_instruction}

{no_fabrication}"#;

/// ATS keyword prompt template.
/// Replace: {job_description}, {format_instruction}
pub const ATS_KEYWORDS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and provide:
1. Key technical skills required
2. Key soft skills required
3. Required qualifications
4. Important keywords for ATS optimization

JOB DESCRIPTION:
{job_description}

Format the response in markdown with clear sections.

{format_instruction}"#;

/// Section improvement prompt template.
/// Replace: {section_text}, {format_instruction}, {no_fabrication}
pub const IMPROVE_SECTION_PROMPT_TEMPLATE: &str = r#"As a professional resume writer, improve this resume section:

{section_text}

Provide:
1. An improved version with stronger action verbs
2. Better quantification of achievements
3. Enhanced formatting suggestions
4. Keywords optimization

Format the response in markdown.

{format_instruction}

{no_fabrication}"#;

/// Cover letter prompt template.
/// Replace: {resume_text}, {job_description}, {company_name}, {role_title},
///          {format_instruction}, {no_fabrication}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for {role_title} at {company_name}.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Requirements:
1. Three to four short paragraphs, under 400 words in total
2. Open with why the candidate fits this specific role, not with a generic greeting line
3. Connect two or three concrete achievements from the resume to the job's key requirements
4. Close with a clear call to action
5. Address it to the hiring team at {company_name}

Return only the letter.

{format_instruction}

{no_fabrication}"#;

/// Stand-in when the caller doesn't name the company.
pub const DEFAULT_COMPANY_NAME: &str = "the hiring company";

/// Stand-in when the caller doesn't name the role.
pub const DEFAULT_ROLE_TITLE: &str = "the advertised role";
