//! Per-request correlation
//!
//! Every request runs inside a `request` span carrying its `X-Request-Id`
//! (taken from the client or generated), and the same id is returned in the
//! response. The span's `user_id` field stays empty until the login guard
//! records the session's user, so logs from protected routes name the guest
//! or host they acted for.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{field, Instrument, Span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_id_middleware(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        user_id = field::Empty,
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Attach the logged-in user to the current request span.
pub fn record_user(user_id: i32) {
    Span::current().record("user_id", user_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/listing",
                get(|| async {
                    record_user(7);
                    "ok"
                }),
            )
            .layer(middleware::from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn client_id_is_echoed() {
        let response = app()
            .oneshot(
                Request::get("/listing")
                    .header(REQUEST_ID_HEADER, "booking-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "booking-42");
    }

    #[tokio::test]
    async fn blank_id_is_replaced() {
        let response = app()
            .oneshot(
                Request::get("/listing")
                    .header(REQUEST_ID_HEADER, "")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
