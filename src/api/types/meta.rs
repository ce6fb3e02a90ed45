//! Response metadata and the success envelope
//!
//! Every body carries `meta: {timestamp, path, version}`. The request path and
//! the configured version are placed in task-local storage by
//! [`request_context_middleware`](crate::api::middleware::request_context_middleware)
//! so that success and error responses can both read them without threading
//! them through every handler.

use std::future::Future;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::task_local;

use crate::domain::Timestamp;

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Per-request values echoed back in response metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub path: String,
    pub version: String,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    /// The context of the request being handled, if any
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Run `fut` with this context in scope
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(self, fut).await
    }
}

/// Metadata attached to every response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub path: String,
    pub version: String,
}

impl ResponseMeta {
    /// Metadata for the request in scope; outside a request the path is empty
    pub fn current() -> Self {
        let context = RequestContext::current()
            .unwrap_or_else(|| RequestContext::new("", env!("CARGO_PKG_VERSION")));

        Self {
            timestamp: Timestamp::now().to_text(),
            path: context.path,
            version: context.version,
        }
    }
}

/// Success envelope: `{data, meta}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::current(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Success envelope returned with `201 Created`
#[derive(Debug, Clone)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, ApiResponse::new(self.0)).into_response()
    }
}
