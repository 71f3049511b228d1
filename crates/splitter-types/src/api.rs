//! API types for the splitter HTTP endpoints.

use crate::outcome::RowOutcome;
use serde::Serialize;

/// Body returned by the webhook endpoint on success or skip.
#[derive(Debug, Clone, Serialize)]
pub struct SplitResponse {
	pub message: String,
	/// Omitted when the order was skipped.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub results: Option<Vec<RowOutcome>>,
}

impl SplitResponse {
	pub fn skipped(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			results: None,
		}
	}

	pub fn completed(message: impl Into<String>, results: Vec<RowOutcome>) -> Self {
		Self {
			message: message.into(),
			results: Some(results),
		}
	}
}

/// JSON error body. Only ever carries a short message, never upstream output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
	pub error: String,
}

impl ErrorBody {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
		}
	}
}
