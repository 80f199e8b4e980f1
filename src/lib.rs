// PDF QA - answers questions about the most recently uploaded PDF

pub mod config;
pub mod db;
pub mod extract;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use types::{AppError, AppResult};

pub fn create_router(state: AppState) -> anyhow::Result<axum::Router> {
    routes::create_router(state)
}
