// Fixed cross-origin headers, stamped on every response regardless of the
// request's Origin

use anyhow::{Context, Result};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CorsConfig;

pub fn apply_cors(router: Router, cors: &CorsConfig) -> Result<Router> {
    let origin = HeaderValue::from_str(&cors.allowed_origin)
        .context("Invalid CORS allowed origin")?;
    let methods = HeaderValue::from_str(&cors.allowed_methods.join(", "))
        .context("Invalid CORS allowed methods")?;
    let headers = HeaderValue::from_str(&cors.allowed_headers.join(", "))
        .context("Invalid CORS allowed headers")?;

    Ok(router
        .layer(middleware::from_fn(answer_preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            methods,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            headers,
        )))
}

/// Browsers send OPTIONS before cross-origin POSTs; answer it directly.
async fn answer_preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(req).await
}
