//! Request identity.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Preserve an ID supplied by the caller
//!
//! # Design Decisions
//! - Plain tower layer so it sits outside every other middleware
//! - The ID travels in the `x-request-id` header and shows up in logs

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that stamps `x-request-id` onto requests lacking one.
#[derive(Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        if !request.headers().contains_key(X_REQUEST_ID) {
            if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
                request.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    fn echo_id_service(
    ) -> impl Service<Request<Body>, Response = Option<HeaderValue>, Error = std::convert::Infallible>
    {
        RequestIdLayer.layer(tower::service_fn(|req: Request<Body>| async move {
            Ok(req.headers().get(X_REQUEST_ID).cloned())
        }))
    }

    #[tokio::test]
    async fn test_inserts_id_when_absent() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let id = echo_id_service().oneshot(request).await.unwrap();
        let id = id.expect("request id should be set");
        assert_eq!(id.to_str().unwrap().len(), 36); // uuid v4
    }

    #[tokio::test]
    async fn test_preserves_caller_supplied_id() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "caller-id")
            .body(Body::empty())
            .unwrap();
        let id = echo_id_service().oneshot(request).await.unwrap();
        assert_eq!(id.unwrap(), "caller-id");
    }
}
