use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One resume per user. `resume_type` is `structured` (builder) or `pdf`
/// (upload); exactly one of `structured_data` / `extracted_text` is set,
/// fixed at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_type: String,
    pub structured_data: Option<Value>,
    pub extracted_text: Option<String>,
    pub file_name: Option<String>,
    pub s3_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
