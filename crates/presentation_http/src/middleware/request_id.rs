//! Request correlation
//!
//! Every request gets an ID, either the caller's `X-Request-Id` or a fresh
//! UUID. The ID is attached to the request extensions, to the tracing span
//! wrapping the turn, and echoed back on the response.

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Longest caller-supplied ID that is kept
const MAX_INCOMING_LEN: usize = 128;

/// Layer that adds request ID handling to HTTP services
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`]
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let request_id = RequestId::from_header(request.headers().get(REQUEST_ID_HEADER));
        request.extensions_mut().insert(request_id.clone());

        let span = tracing::info_span!(
            "turn",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
        );

        // The clone may not be ready; swap so the polled instance serves this call
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Correlation ID of a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse the caller's ID when it is short printable ASCII
    #[must_use]
    pub fn from_header(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| is_acceptable(s))
            .map_or_else(Self::generate, |s| Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_INCOMING_LEN
        && id.bytes().all(|b| b.is_ascii_graphic())
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, Router, body::to_bytes, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn router() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(id): Extension<RequestId>| async move { id.to_string() }),
            )
            .layer(RequestIdLayer::new())
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = RequestId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, RequestId::generate());
    }

    #[test]
    fn caller_id_is_kept() {
        let header = HeaderValue::from_static("connector-abc.123");
        assert_eq!(
            RequestId::from_header(Some(&header)).as_str(),
            "connector-abc.123"
        );
    }

    #[test]
    fn unusable_caller_ids_are_replaced() {
        let too_long = HeaderValue::from_str(&"x".repeat(MAX_INCOMING_LEN + 1)).unwrap();
        let spaced = HeaderValue::from_static("two words");
        let blank = HeaderValue::from_static("   ");

        for header in [too_long, spaced, blank] {
            let id = RequestId::from_header(Some(&header));
            assert!(Uuid::parse_str(id.as_str()).is_ok());
        }
    }

    #[tokio::test]
    async fn response_echoes_incoming_id() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
        assert_eq!(body_text(response).await, "req-42");
    }

    #[tokio::test]
    async fn response_carries_generated_id() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        assert!(Uuid::parse_str(&header).is_ok());
        assert_eq!(body_text(response).await, header);
    }
}
