use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored analysis: the immutable report (score, suggestions, keyword
/// lists as jsonb) plus the mutable review view (decision id arrays and
/// the patched document/text columns).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub job_posting_id: Uuid,
    pub overall_score: i32,
    pub summary: String,
    pub suggestions: Value,
    pub keywords_found: Value,
    pub keywords_missing: Value,
    pub accepted_ids: Vec<String>,
    pub dismissed_ids: Vec<String>,
    pub current_structured: Option<Value>,
    pub current_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
