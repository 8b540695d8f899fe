//! JSON body extractors for Axum
//!
//! `JsonBody<T>` parses the request body as JSON regardless of the
//! `Content-Type` header; a missing key or a wrong type is a `KEY_ERROR`.
//! `ValidatedJson<T>` additionally runs `validator::Validate::validate()` and
//! answers `INVALID_VALUE` when a rule fails.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use super::{ApiError, ErrorCode};

/// An extractor that deserializes a JSON body.
pub struct JsonBody<T>(pub T);

pub enum JsonBodyRejection {
    Body(BytesRejection),
    Parse(serde_json::Error),
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Body(rejection) => debug!(error = %rejection, "Unreadable request body"),
            Self::Parse(error) => debug!(%error, "Malformed request body"),
        }
        ApiError::new(ErrorCode::KeyError).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(JsonBodyRejection::Body)?;
        let value = serde_json::from_slice(&bytes).map_err(JsonBodyRejection::Parse)?;
        Ok(JsonBody(value))
    }
}

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Body {
///     #[validate(length(min = 1))]
///     title: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<Body>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonBodyRejection),
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => rejection.into_response(),
            Self::Validation(errors) => {
                let field_errors = errors.field_errors();
                let fields: Vec<&str> = field_errors.keys().map(|f| f.as_ref()).collect();
                debug!(?fields, "Request body failed validation");
                ApiError::new(ErrorCode::InvalidValue).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::Validation)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        age: u32,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(body: impl Into<Body>) -> (StatusCode, String) {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .body(body.into())
            .unwrap();
        let mut svc = app().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_body_without_content_type_is_accepted() {
        let (status, body) = send(r#"{"name": "Alice", "age": 30}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn missing_key_is_key_error() {
        let (status, body) = send(r#"{"name": "Alice"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"message":"KEY_ERROR"}"#);
    }

    #[tokio::test]
    async fn wrong_type_is_key_error() {
        let (status, body) = send(r#"{"name": "Alice", "age": "thirty"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"message":"KEY_ERROR"}"#);
    }

    #[tokio::test]
    async fn validation_failure_is_invalid_value() {
        let (status, body) = send(r#"{"name": "", "age": 0}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"message":"INVALID_VALUE"}"#);
    }
}
