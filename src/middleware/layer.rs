use super::validator::RouteConfig;
use axum::RequestPartsExt;
use axum::body::{Body, Bytes};
use axum::extract::{RawPathParams, Request};
use axum::response::Response;
use futures::future::BoxFuture;
use http::header::CONTENT_TYPE;
use http::request::Parts;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::validation::RequestValues;

/// Per-route validation middleware, applied with `Router::route_layer`.
/// Obtained from [`Validator::get`](super::Validator::get) and friends.
#[derive(Clone)]
pub struct ValidationLayer {
    config: Arc<RouteConfig>,
}

impl ValidationLayer {
    pub(crate) fn new(config: Arc<RouteConfig>) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Service wrapper that screens each request against the route's rules
/// before handing it to the inner service.
#[derive(Clone)]
pub struct ValidationService<S> {
    inner: S,
    config: Arc<RouteConfig>,
}

impl<S> Service<Request> for ValidationService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let config = Arc::clone(&self.config);
        // Swap in the clone so the service we call is the one poll_ready
        // was driven on
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match screen(&config, request).await {
                Ok(request) => inner.call(request).await,
                Err(response) => Ok(response),
            }
        })
    }
}

/// Validate one request. Returns the (re-assembled) request when it may
/// proceed, or the error handler's response when it may not.
async fn screen(config: &RouteConfig, request: Request) -> Result<Request, Response> {
    let (mut parts, body) = request.into_parts();

    // Named captures from the matched route; empty when the route carries
    // none
    let path = match parts.extract::<RawPathParams>().await {
        Ok(params) => params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        Err(_) => Vec::new(),
    };

    let query = parts
        .uri
        .query()
        .map(|raw| serde_urlencoded::from_str::<Vec<(String, String)>>(raw).unwrap_or_default())
        .unwrap_or_default();

    // Buffer the body only when a body-located parameter or a strict-mode
    // audit needs it; the bytes are re-attached before the inner service
    // runs
    let (body, body_fields) = if config.rules.needs_body() {
        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to buffer request body");
                Bytes::new()
            }
        };
        let fields = parse_body_fields(&parts, &bytes);
        (Body::from(bytes), fields)
    } else {
        (body, Vec::new())
    };

    let values = RequestValues {
        path,
        query,
        headers: parts.headers.clone(),
        body: body_fields,
    };

    let errors = config.rules.evaluate(&values);
    if errors.is_empty() {
        Ok(Request::from_parts(parts, body))
    } else {
        tracing::debug!(
            method = %parts.method,
            uri = %parts.uri,
            violations = errors.len(),
            "request rejected"
        );
        Err(config.on_error.handle(&errors, &parts))
    }
}

/// Top-level fields of a flat object body, in document order. An absent,
/// unparseable, or non-object body yields no fields.
fn parse_body_fields(parts: &Parts, bytes: &Bytes) -> Vec<(String, serde_json::Value)> {
    if bytes.is_empty() {
        return Vec::new();
    }

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.contains("json") {
        match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            Ok(_) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "unparseable JSON request body");
                Vec::new()
            }
        }
    } else if content_type.contains("x-www-form-urlencoded") {
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes) {
            Ok(pairs) => pairs
                .into_iter()
                .map(|(name, value)| (name, serde_json::Value::String(value)))
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "unparseable form request body");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    }
}
