//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::AnalysisInput;
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::job::JobPostingRow;
use crate::models::resume::ResumeRow;
use crate::resume::document::ResumeData;
use crate::resume::handlers::UserIdQuery;
use crate::resume::text::resume_to_plain_text;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAnalysisRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub job_posting_id: Uuid,
}

/// POST /api/v1/analyses
///
/// Runs the analyzer over the user's resume and a saved job posting and
/// stores the validated report with empty decision sets.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(req): Json<CreateAnalysisRequest>,
) -> Result<Json<AnalysisRow>, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(req.resume_id)
            .bind(req.user_id)
            .fetch_optional(&state.db)
            .await?;
    let resume = resume
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", req.resume_id)))?;

    let job: Option<JobPostingRow> =
        sqlx::query_as("SELECT * FROM job_postings WHERE id = $1 AND user_id = $2")
            .bind(req.job_posting_id)
            .bind(req.user_id)
            .fetch_optional(&state.db)
            .await?;
    let job = job.ok_or_else(|| {
        AppError::NotFound(format!("Job posting {} not found", req.job_posting_id))
    })?;

    let structured: Option<ResumeData> = match &resume.structured_data {
        Some(value) => Some(
            serde_json::from_value(value.clone())
                .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt structured_data: {e}")))?,
        ),
        None => None,
    };

    let resume_text = match &structured {
        Some(data) => resume_to_plain_text(data),
        None => resume
            .extracted_text
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::UnprocessableEntity("resume has no extracted text".to_string())
            })?,
    };

    let input = AnalysisInput {
        resume_text: &resume_text,
        structured: structured.as_ref(),
        job_description: &job.description,
    };
    let report = state.analyzer.analyze(&input).await?;

    info!(
        "Analysis complete for resume {}: score {}, {} suggestions",
        resume.id,
        report.overall_score,
        report.suggestions.len()
    );

    // Snapshot the resume content onto the analysis row: review
    // operations replay against this copy, so a later edit or re-upload
    // of the live resume cannot shift the base under stored decisions.
    let (current_structured, current_text) = match &structured {
        Some(data) => (
            Some(serde_json::to_value(data).map_err(|e| AppError::Internal(e.into()))?),
            None,
        ),
        None => (None, Some(resume_text)),
    };

    let row = insert_analysis(&state, &req, &report, current_structured, current_text).await?;
    Ok(Json(row))
}

async fn insert_analysis(
    state: &AppState,
    req: &CreateAnalysisRequest,
    report: &AnalysisReport,
    current_structured: Option<serde_json::Value>,
    current_text: Option<String>,
) -> Result<AnalysisRow, AppError> {
    let suggestions =
        serde_json::to_value(&report.suggestions).map_err(|e| AppError::Internal(e.into()))?;
    let keywords_found =
        serde_json::to_value(&report.keywords_found).map_err(|e| AppError::Internal(e.into()))?;
    let keywords_missing = serde_json::to_value(&report.keywords_missing)
        .map_err(|e| AppError::Internal(e.into()))?;

    let row: AnalysisRow = sqlx::query_as(
        r#"
        INSERT INTO analyses
            (id, user_id, resume_id, job_posting_id, overall_score, summary,
             suggestions, keywords_found, keywords_missing,
             accepted_ids, dismissed_ids, current_structured, current_text, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, '{}', '{}', $10, $11, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(req.resume_id)
    .bind(req.job_posting_id)
    .bind(i32::from(report.overall_score))
    .bind(&report.summary)
    .bind(suggestions)
    .bind(keywords_found)
    .bind(keywords_missing)
    .bind(current_structured)
    .bind(current_text)
    .fetch_one(&state.db)
    .await?;

    Ok(row)
}

/// GET /api/v1/analyses?user_id=...
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    let rows: Vec<AnalysisRow> =
        sqlx::query_as("SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

/// GET /api/v1/analyses/:id?user_id=...
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row: Option<AnalysisRow> =
        sqlx::query_as("SELECT * FROM analyses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(params.user_id)
            .fetch_optional(&state.db)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/analyses/:id?user_id=...
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM analyses WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Analysis {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
