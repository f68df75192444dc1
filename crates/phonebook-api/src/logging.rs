//! Request logging middleware
//!
//! Logs one line per request with method, uri, status, response size and
//! latency. POST requests also log the request body; the body is buffered
//! and handed to the inner service unchanged.

use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::{Body, HttpBody};
use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::error::ApiError;

/// Upper bound on a buffered POST body, equal to axum's default body limit
const MAX_BUFFERED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Layer that logs every request
///
/// # Example
///
/// ```rust,ignore
/// use phonebook_api::RequestLogLayer;
///
/// let app = Router::new()
///     .route("/api/persons", get(list_persons))
///     .layer(RequestLogLayer::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestLogLayer;

impl RequestLogLayer {
    /// Create a new request log layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService { inner }
    }
}

/// Service produced by [`RequestLogLayer`]
#[derive(Debug, Clone)]
pub struct RequestLogService<S> {
    inner: S,
}

impl<S> Service<Request> for RequestLogService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let start = Instant::now();
        let method = request.method().clone();
        let uri = request.uri().clone();

        // Take the service that was driven to readiness, leave a clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let (response, logged_body) = if method == Method::POST {
                let (parts, body) = request.into_parts();
                match axum::body::to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
                    Ok(bytes) => {
                        let text = String::from_utf8_lossy(&bytes).into_owned();
                        let request = Request::from_parts(parts, Body::from(bytes));
                        (inner.call(request).await?, Some(text))
                    }
                    Err(e) => {
                        tracing::warn!(method = %method, uri = %uri, "Failed to read request body: {}", e);
                        let rejected =
                            ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
                        (rejected.into_response(), Some("-".to_string()))
                    }
                }
            } else {
                (inner.call(request).await?, None)
            };

            let response_time_ms = start.elapsed().as_secs_f64() * 1000.0;
            let content_length = response_size(&response);

            match logged_body {
                Some(body) => tracing::info!(
                    method = %method,
                    uri = %uri,
                    status = response.status().as_u16(),
                    content_length = %content_length,
                    response_time_ms,
                    body = %body,
                    "Request completed"
                ),
                None => tracing::info!(
                    method = %method,
                    uri = %uri,
                    status = response.status().as_u16(),
                    content_length = %content_length,
                    response_time_ms,
                    "Request completed"
                ),
            }

            Ok(response)
        })
    }
}

/// Size of the response body, or "-" when it is not known up front
fn response_size(response: &Response) -> String {
    if let Some(length) = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
    {
        return length.to_string();
    }

    response
        .body()
        .size_hint()
        .exact()
        .map(|size| size.to_string())
        .unwrap_or_else(|| "-".to_string())
}
