// SPDX-License-Identifier: MIT

//! Shared-secret authentication for the aggregation trigger endpoints.
//!
//! Both the Cloud Scheduler job and manual invocations carry the secret
//! in the `x-aggregation-secret` header. A failed check performs zero
//! aggregation work.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Header carrying the trigger secret.
pub const TRIGGER_SECRET_HEADER: &str = "x-aggregation-secret";

/// Require a valid shared secret on `/tasks/*` routes.
pub async fn require_trigger_secret(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(TRIGGER_SECRET_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(secret) if secrets_match(secret, &state.config.aggregation_secret) => {
            Ok(next.run(request).await)
        }
        _ => {
            tracing::warn!(
                path = %request.uri().path(),
                "Blocked trigger request with missing or invalid secret"
            );
            Err(AppError::Unauthorized)
        }
    }
}

/// Constant-time secret comparison.
fn secrets_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
