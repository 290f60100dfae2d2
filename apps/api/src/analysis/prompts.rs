//! Prompts for the resume/job-description analysis call.

/// Expected JSON shape, shared by both prompt variants. Mirrors
/// `analysis::report::AnalysisReport`.
const SCHEMA_BLOCK: &str = r#"Respond with a JSON object of this exact shape:
{
  "overallScore": <integer 0-100>,
  "suggestions": [{
    "id": "<unique string id, e.g. s1, s2>",
    "type": "add_keyword" | "improve_wording" | "add_section" | "remove_content" | "formatting",
    "title": "<short title>",
    "description": "<detailed explanation>",
    "priority": "high" | "medium" | "low",
    "section": "<resume section this applies to, optional>",
    "originalText": "<exact text from the resume to improve, optional>",
    "suggestedText": "<replacement or addition text, optional>"
  }],
  "keywordsFound": [{"keyword": "<string>", "context": "<where it was found, optional>"}],
  "keywordsMissing": [{
    "keyword": "<string>",
    "importance": "critical" | "important" | "nice-to-have",
    "suggestion": "<how to incorporate it>"
  }],
  "summary": "<brief overall assessment of fit>"
}"#;

/// Prompt for flat-text resumes. `originalText` must quote the resume
/// verbatim so literal replacement can locate it.
pub fn analyze_text_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert ATS (Applicant Tracking System) analyzer and career coach. Analyze the following resume against the job description and provide detailed, actionable feedback.

## Resume:
{resume_text}

## Job Description:
{job_description}

## Instructions:
1. Calculate an overall ATS compatibility score (0-100) based on keyword matches, relevant experience, and formatting.
2. Identify specific areas where the resume can be improved to better match this job posting.
3. For each suggestion, quote the original text from the resume EXACTLY as it appears (it will be used for literal replacement) and provide a suggested improvement.
4. Focus on:
   - Missing keywords that are important for ATS scanning
   - Experience descriptions that could be reworded to match job requirements
   - Skills or qualifications that should be highlighted or added
   - Formatting issues that might affect ATS parsing
5. Be specific and actionable - don't give vague advice.
6. Prioritize suggestions that will have the most impact on ATS scoring and recruiter interest.

{SCHEMA_BLOCK}"#
    )
}

/// Prompt for structured (builder-created) resumes. In addition to the
/// rendered text, the model sees the JSON document and must attach a
/// `path` to every suggestion that edits an existing field, using
/// dot/bracket addressing into that document.
pub fn analyze_structured_prompt(
    resume_text: &str,
    resume_json: &str,
    job_description: &str,
) -> String {
    format!(
        r#"You are an expert ATS (Applicant Tracking System) analyzer and career coach. Analyze the following resume against the job description and provide detailed, actionable feedback.

## Resume (rendered):
{resume_text}

## Resume (structured JSON document):
{resume_json}

## Job Description:
{job_description}

## Instructions:
1. Calculate an overall ATS compatibility score (0-100) based on keyword matches, relevant experience, and formatting.
2. Identify specific areas where the resume can be improved to better match this job posting.
3. For every suggestion that rewrites an existing field, include a "path" property addressing the scalar in the JSON document using dot/bracket notation, e.g. "experience[0].bullets[2]" or "skills.languages", plus "originalText" holding the field's current exact value and "suggestedText" holding the replacement.
4. Never invent a path that does not exist in the document; list indices are zero-based.
5. Focus on missing keywords, weak wording, sections to add, and formatting issues that affect ATS parsing.
6. Be specific and actionable - don't give vague advice.

{SCHEMA_BLOCK}

Suggestions for structured resumes may additionally carry "path" as described above."#
    )
}
