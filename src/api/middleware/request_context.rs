//! Puts the request path and service version in scope for response metadata

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;
use crate::api::types::RequestContext;

pub async fn request_context_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    RequestContext::new(path, state.version.clone())
        .scope(next.run(request))
        .await
}
