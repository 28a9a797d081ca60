//! Request-context middleware
//!
//! Opens an isolated context scope for the lifetime of one inbound
//! request, seeds the correlation fields before any downstream logic
//! runs, and records the final status code on every exit path.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use chrono::Utc;
use http::header::{HeaderName, HeaderValue};
use uuid::Uuid;
use vitals_core::{context, logging, ContextMap};

/// Response header carrying the correlation identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The request's correlation identifier, also stored in request
/// extensions so extractors can read it without touching the scope.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware entry point. Everything downstream of this layer, including
/// continuations after suspension points, observes the scope seeded here.
pub async fn request_context(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    // The id is fixed before downstream runs; the response header itself
    // can only be stamped once axum hands the response back.
    request.extensions_mut().insert(RequestId(request_id.clone()));

    context::scope(ContextMap::new(), async move {
        context::set("requestId", request_id.clone());
        context::set("requestPath", path.clone());
        context::set("method", method.clone());
        context::set("startTime", Utc::now().timestamp_millis());

        logging::http(&format!("→ {method} {path}"));

        let guard = CompletionGuard::new();
        let mut response = next.run(request).await;
        let status = response.status().as_u16();
        guard.complete(status);

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        logging::http(&format!(
            "← {status} ({}ms)",
            started.elapsed().as_millis()
        ));

        response
    })
    .await
}

/// Records `statusCode` into the scope on every exit path, the way a
/// `finally` block would. The drop arm covers early returns; the normal
/// path records the real status.
struct CompletionGuard {
    recorded: bool,
}

impl CompletionGuard {
    fn new() -> Self {
        Self { recorded: false }
    }

    fn complete(mut self, status: u16) {
        self.recorded = true;
        context::set("statusCode", status);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.recorded {
            context::set("statusCode", 500);
        }
    }
}
