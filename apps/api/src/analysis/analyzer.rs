//! Pluggable analysis backend.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`, so the production LLM
//! backend can be swapped out (notably in tests) without touching the
//! handlers.

use async_trait::async_trait;

use crate::analysis::prompts::{analyze_structured_prompt, analyze_text_prompt};
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::llm_client::{prompts::JSON_ONLY_SYSTEM, LlmClient};
use crate::resume::document::ResumeData;

const ANALYSIS_MAX_TOKENS: u32 = 4096;

/// Everything the analyzer needs for one resume/job pair. `structured`
/// is present for builder resumes so suggestions can carry field paths.
pub struct AnalysisInput<'a> {
    pub resume_text: &'a str,
    pub structured: Option<&'a ResumeData>,
    pub job_description: &'a str,
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, input: &AnalysisInput<'_>) -> Result<AnalysisReport, AppError>;
}

/// Production backend: one Claude call, schema-validated.
pub struct LlmAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmAnalyzer {
    async fn analyze(&self, input: &AnalysisInput<'_>) -> Result<AnalysisReport, AppError> {
        let prompt = match input.structured {
            Some(data) => {
                let resume_json = serde_json::to_string_pretty(data)
                    .map_err(|e| AppError::Internal(e.into()))?;
                analyze_structured_prompt(input.resume_text, &resume_json, input.job_description)
            }
            None => analyze_text_prompt(input.resume_text, input.job_description),
        };

        let report: AnalysisReport = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM, ANALYSIS_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

        report
            .validate()
            .map_err(|e| AppError::Llm(format!("Analysis payload rejected: {e}")))?;

        Ok(report)
    }
}
