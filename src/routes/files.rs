use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::models::{AppState, UploadResponse};
use crate::types::{AppError, AppResult};

pub const FILE_FIELD: &str = "pdf";
pub const NO_FILE_UPLOADED: &str = "No file uploaded";

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    // Not multipart at all: same as a form without the file
    let Ok(mut multipart) = multipart else {
        return Err(AppError::InvalidRequest(NO_FILE_UPLOADED.to_string()));
    };

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(e.body_text()))?
    {
        // Plain text fields, even one named `pdf`, are not files
        if field.name() != Some(FILE_FIELD) || field.file_name().is_none() {
            continue;
        }
        if file.is_some() {
            return Err(AppError::Internal(format!("Unexpected field: {FILE_FIELD}")));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(e.body_text()))?;
        file = Some((filename, bytes));
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::InvalidRequest(NO_FILE_UPLOADED.to_string()))?;
    info!("File upload received: {} ({} bytes)", filename, bytes.len());

    let text = state.extractor.extract(&bytes).await?;
    let id = state.store.save(&text).await?;
    info!("Stored document {} ({} characters)", id, text.len());

    Ok(Json(UploadResponse { text }))
}
