pub mod engine;
pub mod field_path;
pub mod handlers;
pub mod score;
