//! Axum route handlers for the Review API.
//!
//! The engine itself is a pure value type; these handlers rehydrate a
//! `ReviewState` from the analysis row, run one transition, persist the
//! new revision, and return the full view the client renders (and
//! exports) from. Every operation is all-or-nothing: a failed transition
//! leaves the stored state untouched.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::report::Suggestion;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::resume::handlers::UserIdQuery;
use crate::review::engine::{ResumeContent, ReviewState};
use crate::state::AppState;

/// Everything the viewer needs after any operation.
#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub analysis_id: Uuid,
    pub base_score: u8,
    pub score: u8,
    pub resume: ResumeContent,
    pub active: Vec<Suggestion>,
    pub accepted: Vec<Suggestion>,
    pub dismissed: Vec<String>,
}

struct ReviewSession {
    row: AnalysisRow,
    suggestions: Vec<Suggestion>,
    state: ReviewState,
}

impl ReviewSession {
    fn base_score(&self) -> u8 {
        self.row.overall_score.clamp(0, 100) as u8
    }

    fn find_suggestion(&self, sid: &str) -> Result<&Suggestion, AppError> {
        self.suggestions
            .iter()
            .find(|s| s.id == sid)
            .ok_or_else(|| AppError::NotFound(format!("Suggestion '{sid}' not found")))
    }

    fn view(&self) -> ReviewView {
        ReviewView {
            analysis_id: self.row.id,
            base_score: self.base_score(),
            score: self
                .state
                .current_score(self.base_score(), self.suggestions.len()),
            resume: self.state.content.clone(),
            active: self
                .state
                .active(&self.suggestions)
                .into_iter()
                .cloned()
                .collect(),
            accepted: self
                .state
                .accepted_suggestions(&self.suggestions)
                .into_iter()
                .cloned()
                .collect(),
            dismissed: self.state.dismissed.iter().cloned().collect(),
        }
    }
}

/// Rebuilds the resume content from the analysis row's own columns. The
/// structured column wins when set; an analysis row with neither column
/// populated is corrupt, since both are written at creation time.
fn snapshot_content(
    current_structured: Option<Value>,
    current_text: Option<String>,
) -> Result<ResumeContent, AppError> {
    if let Some(value) = current_structured {
        return Ok(ResumeContent::Structured {
            data: serde_json::from_value(value)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt structured_data: {e}")))?,
        });
    }
    if let Some(text) = current_text {
        return Ok(ResumeContent::Text { text });
    }
    Err(AppError::Internal(anyhow::anyhow!(
        "analysis row without resume snapshot"
    )))
}

/// Accepting a dismissed suggestion would put its id in both decision
/// sets; dismissal is terminal, so reject instead of silently merging.
fn ensure_acceptable(state: &ReviewState, sid: &str) -> Result<(), AppError> {
    if state.dismissed.contains(sid) {
        return Err(AppError::UnprocessableEntity(format!(
            "Suggestion '{sid}' is dismissed"
        )));
    }
    Ok(())
}

/// Dismissing an accepted suggestion is likewise rejected; the client
/// must undo first so the applied edit is rolled back.
fn ensure_dismissable(state: &ReviewState, sid: &str) -> Result<(), AppError> {
    if state.accepted.contains(sid) {
        return Err(AppError::UnprocessableEntity(format!(
            "Suggestion '{sid}' is accepted"
        )));
    }
    Ok(())
}

async fn load_session(
    state: &AppState,
    analysis_id: Uuid,
    user_id: Uuid,
) -> Result<ReviewSession, AppError> {
    let row: Option<AnalysisRow> =
        sqlx::query_as("SELECT * FROM analyses WHERE id = $1 AND user_id = $2")
            .bind(analysis_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;

    let suggestions: Vec<Suggestion> = serde_json::from_value(row.suggestions.clone())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt suggestions payload: {e}")))?;

    // The analysis row carries its own snapshot of the resume, taken at
    // creation time, so later edits or re-uploads of the live resume
    // never shift the base under the stored decision sets.
    let content = snapshot_content(row.current_structured.clone(), row.current_text.clone())?;

    let mut review = ReviewState::new(content);
    review.accepted = row.accepted_ids.iter().cloned().collect::<BTreeSet<_>>();
    review.dismissed = row.dismissed_ids.iter().cloned().collect::<BTreeSet<_>>();

    Ok(ReviewSession {
        row,
        suggestions,
        state: review,
    })
}

async fn persist_session(state: &AppState, session: &ReviewSession) -> Result<(), AppError> {
    let (current_structured, current_text) = match &session.state.content {
        ResumeContent::Structured { data } => (
            Some(serde_json::to_value(data).map_err(|e| AppError::Internal(e.into()))?),
            None,
        ),
        ResumeContent::Text { text } => (None, Some(text.clone())),
    };

    sqlx::query(
        r#"
        UPDATE analyses
        SET accepted_ids = $1, dismissed_ids = $2,
            current_structured = $3, current_text = $4
        WHERE id = $5
        "#,
    )
    .bind(session.state.accepted.iter().cloned().collect::<Vec<_>>())
    .bind(session.state.dismissed.iter().cloned().collect::<Vec<_>>())
    .bind(current_structured)
    .bind(current_text)
    .bind(session.row.id)
    .execute(&state.db)
    .await?;

    Ok(())
}

/// GET /api/v1/analyses/:id/review?user_id=...
pub async fn handle_get_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReviewView>, AppError> {
    let session = load_session(&state, id, params.user_id).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/analyses/:id/suggestions/:sid/accept?user_id=...
pub async fn handle_accept_suggestion(
    State(state): State<AppState>,
    Path((id, sid)): Path<(Uuid, String)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReviewView>, AppError> {
    let mut session = load_session(&state, id, params.user_id).await?;
    let suggestion = session.find_suggestion(&sid)?.clone();
    ensure_acceptable(&session.state, &sid)?;
    session.state = session.state.accept(&suggestion)?;
    persist_session(&state, &session).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/analyses/:id/suggestions/:sid/dismiss?user_id=...
pub async fn handle_dismiss_suggestion(
    State(state): State<AppState>,
    Path((id, sid)): Path<(Uuid, String)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReviewView>, AppError> {
    let mut session = load_session(&state, id, params.user_id).await?;
    session.find_suggestion(&sid)?;
    ensure_dismissable(&session.state, &sid)?;
    session.state = session.state.dismiss(&sid);
    persist_session(&state, &session).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/analyses/:id/suggestions/:sid/undo?user_id=...
pub async fn handle_undo_suggestion(
    State(state): State<AppState>,
    Path((id, sid)): Path<(Uuid, String)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReviewView>, AppError> {
    let mut session = load_session(&state, id, params.user_id).await?;
    let suggestion = session.find_suggestion(&sid)?.clone();
    if !session.state.accepted.contains(&sid) {
        return Err(AppError::UnprocessableEntity(format!(
            "Suggestion '{sid}' is not accepted"
        )));
    }
    session.state = session.state.undo(&suggestion)?;
    persist_session(&state, &session).await?;
    Ok(Json(session.view()))
}
