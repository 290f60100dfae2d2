//! Job-posting CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobPostingRow;
use crate::resume::handlers::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub user_id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub description: String,
}

impl CreateJobRequest {
    /// Trims every text field and rejects blank title/description. The
    /// description keeps its interior formatting; only the ends are
    /// trimmed.
    fn sanitized(self) -> Result<Self, AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::Validation(
                "description cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            user_id: self.user_id,
            title,
            company: self.company.map(|c| c.trim().to_string()),
            description,
        })
    }
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<JobPostingRow>, AppError> {
    let req = req.sanitized()?;

    let row: JobPostingRow = sqlx::query_as(
        r#"
        INSERT INTO job_postings (id, user_id, title, company, description, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/jobs?user_id=...
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<JobPostingRow>>, AppError> {
    let rows: Vec<JobPostingRow> = sqlx::query_as(
        "SELECT * FROM job_postings WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// DELETE /api/v1/jobs/:id?user_id=...
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM job_postings WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job posting {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, company: Option<&str>, description: &str) -> CreateJobRequest {
        CreateJobRequest {
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            company: company.map(str::to_string),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_sanitized_trims_all_text_fields() {
        let req = request("  Backend Engineer ", Some(" Acme "), "\n  We need Rust.  \n")
            .sanitized()
            .unwrap();
        assert_eq!(req.title, "Backend Engineer");
        assert_eq!(req.company.as_deref(), Some("Acme"));
        assert_eq!(req.description, "We need Rust.");
    }

    #[test]
    fn test_sanitized_preserves_interior_description_layout() {
        let req = request("Dev", None, "  Line one\n\nLine two  ")
            .sanitized()
            .unwrap();
        assert_eq!(req.description, "Line one\n\nLine two");
    }

    #[test]
    fn test_sanitized_rejects_blank_required_fields() {
        assert!(request("   ", None, "desc").sanitized().is_err());
        assert!(request("Dev", None, " \n ").sanitized().is_err());
    }
}
