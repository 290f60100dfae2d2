//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_pdf_text;
use crate::models::resume::ResumeRow;
use crate::resume::document::ResumeData;
use crate::state::AppState;
use crate::storage::upload_resume_pdf;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub user_id: Uuid,
    pub data: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub resume: ResumeRow,
    pub extracted_text: String,
}

/// POST /api/v1/resumes
///
/// Saves or replaces the user's builder-created resume. This is the
/// editing layer: it rejects a missing name and any experience or
/// project entry without at least one non-blank bullet, so the review
/// engine can assume well-formed documents.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    validate_resume_data(&req.data)?;

    let structured = serde_json::to_value(&req.data).map_err(|e| AppError::Internal(e.into()))?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, resume_type, structured_data, extracted_text,
                             file_name, s3_key, created_at, updated_at)
        VALUES ($1, $2, 'structured', $3, NULL, NULL, NULL, NOW(), NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            resume_type = 'structured',
            structured_data = EXCLUDED.structured_data,
            extracted_text = NULL,
            file_name = NULL,
            s3_key = NULL,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(structured)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// POST /api/v1/resumes/upload?user_id=...
///
/// Multipart PDF upload: extracts the text layer, stores the original in
/// S3, and replaces the user's resume with a flat-text one. Either the
/// whole chain succeeds or the previous resume stays untouched.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?,
            );
        }
    }

    let bytes = file_bytes.ok_or_else(|| {
        AppError::Validation("multipart field 'file' is required".to_string())
    })?;
    let file_name =
        file_name.unwrap_or_else(|| "resume.pdf".to_string());
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "only PDF uploads are supported".to_string(),
        ));
    }

    let extracted_text = extract_pdf_text(bytes.to_vec()).await?;
    let s3_key = upload_resume_pdf(
        &state.s3,
        &state.config.s3_bucket,
        params.user_id,
        bytes,
    )
    .await?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, resume_type, structured_data, extracted_text,
                             file_name, s3_key, created_at, updated_at)
        VALUES ($1, $2, 'pdf', NULL, $3, $4, $5, NOW(), NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            resume_type = 'pdf',
            structured_data = NULL,
            extracted_text = EXCLUDED.extracted_text,
            file_name = EXCLUDED.file_name,
            s3_key = EXCLUDED.s3_key,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.user_id)
    .bind(&extracted_text)
    .bind(&file_name)
    .bind(&s3_key)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(UploadResumeResponse {
        resume: row,
        extracted_text,
    }))
}

/// GET /api/v1/resumes?user_id=...
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1")
        .bind(params.user_id)
        .fetch_optional(&state.db)
        .await?;

    let row = row.ok_or_else(|| {
        AppError::NotFound(format!("No resume for user {}", params.user_id))
    })?;
    Ok(Json(row))
}

fn validate_resume_data(data: &ResumeData) -> Result<(), AppError> {
    if data.personal_info.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "personalInfo.fullName is required".to_string(),
        ));
    }
    for (i, exp) in data.experience.iter().enumerate() {
        if !exp.bullets.iter().any(|b| !b.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "experience[{i}] must have at least one bullet"
            )));
        }
    }
    for (i, proj) in data.projects.iter().enumerate() {
        if !proj.bullets.iter().any(|b| !b.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "projects[{i}] must have at least one bullet"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::document::{Experience, PersonalInfo};

    fn valid_data() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                ..Default::default()
            },
            experience: vec![Experience {
                id: "exp-1".to_string(),
                bullets: vec!["Built stuff".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(validate_resume_data(&valid_data()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_name() {
        let mut data = valid_data();
        data.personal_info.full_name = "  ".to_string();
        assert!(validate_resume_data(&data).is_err());
    }

    #[test]
    fn test_validate_rejects_bulletless_experience() {
        let mut data = valid_data();
        data.experience[0].bullets = vec!["   ".to_string()];
        let err = validate_resume_data(&data).unwrap_err();
        assert!(err.to_string().contains("experience[0]"));
    }

    #[test]
    fn test_validate_rejects_bulletless_project() {
        let mut data = valid_data();
        data.projects.push(crate::resume::document::Project {
            id: "proj-1".to_string(),
            bullets: vec![],
            ..Default::default()
        });
        assert!(validate_resume_data(&data).is_err());
    }
}
