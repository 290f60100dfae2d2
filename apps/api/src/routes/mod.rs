pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::jobs;
use crate::resume::handlers as resumes;
use crate::review::handlers as review;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(resumes::handle_save_resume))
        .route("/api/v1/resumes", get(resumes::handle_get_resume))
        .route("/api/v1/resumes/upload", post(resumes::handle_upload_resume))
        // Job postings
        .route("/api/v1/jobs", post(jobs::handle_create_job))
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", delete(jobs::handle_delete_job))
        // Analyses
        .route("/api/v1/analyses", post(analysis::handle_create_analysis))
        .route("/api/v1/analyses", get(analysis::handle_list_analyses))
        .route("/api/v1/analyses/:id", get(analysis::handle_get_analysis))
        .route(
            "/api/v1/analyses/:id",
            delete(analysis::handle_delete_analysis),
        )
        // Review (suggestion decisions over a stored analysis)
        .route("/api/v1/analyses/:id/review", get(review::handle_get_review))
        .route(
            "/api/v1/analyses/:id/suggestions/:sid/accept",
            post(review::handle_accept_suggestion),
        )
        .route(
            "/api/v1/analyses/:id/suggestions/:sid/dismiss",
            post(review::handle_dismiss_suggestion),
        )
        .route(
            "/api/v1/analyses/:id/suggestions/:sid/undo",
            post(review::handle_undo_suggestion),
        )
        .with_state(state)
}
