use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    routing::post,
    Form, Json, Router,
};
use tracing::info;

use crate::models::{AppState, AskRequest, AskResponse};
use crate::types::{AppError, AppResult};

pub const QUESTION_REQUIRED: &str = "Question is required";
pub const NO_PDF_FOUND: &str = "No PDF found";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(ask_question))
        .with_state(state)
}

pub async fn ask_question(
    State(state): State<AppState>,
    request: Request,
) -> AppResult<Json<AskResponse>> {
    let question = read_question(request)
        .await
        .ok_or_else(|| AppError::InvalidRequest(QUESTION_REQUIRED.to_string()))?;

    let document = state
        .store
        .fetch_latest()
        .await
        .ok_or_else(|| AppError::NotFound(NO_PDF_FOUND.to_string()))?;

    info!(
        "Answering question against document {} ({} characters)",
        document.id,
        document.text.len()
    );
    let answer = state.completion.answer(&document.text, &question).await?;

    Ok(Json(AskResponse { answer }))
}

/// JSON or urlencoded body; `None` when absent, empty or unreadable.
async fn read_question(request: Request) -> Option<String> {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    let payload = if is_form {
        Form::<AskRequest>::from_request(request, &()).await.ok()?.0
    } else {
        Json::<AskRequest>::from_request(request, &()).await.ok()?.0
    };

    payload.question.filter(|question| !question.is_empty())
}
