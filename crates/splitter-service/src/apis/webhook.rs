//! Order-creation webhook endpoint.
//!
//! Authenticates the delivery when a signing secret is configured, decodes the
//! order and hands it to the split workflow. The workflow's outcome becomes the
//! response body; per-row failures stay in the `results` array with a 200.

use crate::signature::verify_signature;
use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use splitter_core::{OrderSplitter, SplitError, SplitOutcome};
use splitter_types::{ErrorBody, Order, SecretString, SplitResponse};
use thiserror::Error;

/// Errors that end a webhook request without a split result.
#[derive(Debug, Error)]
pub enum WebhookError {
	#[error("Invalid webhook signature")]
	InvalidSignature,
	#[error("Invalid order payload: {0}")]
	InvalidPayload(String),
	#[error(transparent)]
	Split(#[from] SplitError),
}

impl WebhookError {
	fn status(&self) -> StatusCode {
		match self {
			WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
			WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
			WebhookError::Split(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for WebhookError {
	fn into_response(self) -> Response {
		// Workflow failures may carry upstream detail; keep it in the logs only.
		let body = match &self {
			WebhookError::Split(_) => ErrorBody::new("Internal server error"),
			other => ErrorBody::new(other.to_string()),
		};
		(self.status(), Json(body)).into_response()
	}
}

/// Processes one webhook delivery.
///
/// With `secret` set, the body must carry a valid signature before it is even
/// decoded.
pub async fn process_order_webhook(
	splitter: &OrderSplitter,
	secret: Option<&SecretString>,
	signature: Option<&str>,
	body: &[u8],
) -> Result<SplitResponse, WebhookError> {
	if let Some(secret) = secret {
		if !verify_signature(secret, body, signature) {
			return Err(WebhookError::InvalidSignature);
		}
	}

	let order: Order =
		serde_json::from_slice(body).map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

	let outcome = splitter.process(&order).await?;
	let message = outcome.summary();

	Ok(match outcome {
		SplitOutcome::Skipped => SplitResponse::skipped(message),
		SplitOutcome::Completed { results, .. } => SplitResponse::completed(message, results),
	})
}
