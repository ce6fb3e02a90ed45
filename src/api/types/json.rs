//! JSON extractor that reports rejections in the API error envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::domain::ErrorKind;

/// Wrapper around `axum::Json` whose rejections are `ApiError`s
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consume the extractor and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::new(
                rejection_status(&rejection),
                ErrorKind::ValidationError.as_str(),
                format_rejection_message(&rejection),
            )),
        }
    }
}

/// Body problems are client validation errors; transport problems keep axum's status
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => rejection.status(),
    }
}

fn format_rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        JsonRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        email: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let Json(payload) = Json::<Payload>::from_request(json_request(r#"{"email":"a@b.co"}"#), &())
            .await
            .unwrap();

        assert_eq!(payload.email, "a@b.co");
    }

    #[tokio::test]
    async fn test_syntax_error_becomes_api_error() {
        let err = Json::<Payload>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert!(err.message.starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_missing_field_is_data_error() {
        let err = Json::<Payload>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"email":"a@b.co"}"#))
            .unwrap();

        let err = Json::<Payload>::from_request(request, &()).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_json_into_inner() {
        assert_eq!(Json(42).into_inner(), 42);
    }
}
