//! CSV export endpoint.
//!
//! Accepts an array of flat JSON records and returns them as a CSV document
//! whose header is taken from the first record.

use axum::{
	http::{header, StatusCode},
	response::{IntoResponse, Response},
};
use splitter_csv::{encode_records, CsvError};
use tracing::warn;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const CSV_DISPOSITION: &str = "attachment; filename=\"order_history.csv\"";

/// Parses `body` as JSON and encodes it as CSV.
///
/// A body that is not valid JSON is reported as [`CsvError::InvalidInput`].
pub fn generate_csv(body: &[u8]) -> Result<String, CsvError> {
	let records: serde_json::Value = serde_json::from_slice(body)
		.map_err(|e| CsvError::InvalidInput(format!("request body is not valid JSON: {}", e)))?;
	encode_records(&records)
}

/// Maps the encode result onto the HTTP response.
pub fn csv_response(result: Result<String, CsvError>) -> Response {
	match result {
		Ok(csv) => (
			StatusCode::OK,
			[
				(header::CONTENT_TYPE, CSV_CONTENT_TYPE),
				(header::CONTENT_DISPOSITION, CSV_DISPOSITION),
			],
			csv,
		)
			.into_response(),
		Err(CsvError::InvalidInput(message)) => {
			warn!("Rejected CSV export request: {}", message);
			(StatusCode::BAD_REQUEST, message).into_response()
		},
		Err(e) => {
			warn!("CSV export failed: {}", e);
			(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate CSV").into_response()
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_csv_from_records() {
		let body = br#"[{"name":"Ann","city":"Austin"},{"name":"Bo"}]"#;
		let csv = generate_csv(body).unwrap();

		assert_eq!(csv, "name,city\nAnn,Austin\nBo,\n");
	}

	#[test]
	fn test_invalid_json_is_invalid_input() {
		let err = generate_csv(b"not json").unwrap_err();
		assert!(matches!(err, CsvError::InvalidInput(_)));
	}

	#[test]
	fn test_empty_array_is_invalid_input() {
		let err = generate_csv(b"[]").unwrap_err();
		assert!(matches!(err, CsvError::InvalidInput(_)));
	}

	#[test]
	fn test_response_status_mapping() {
		let ok = csv_response(Ok("a\n1\n".to_string()));
		assert_eq!(ok.status(), StatusCode::OK);
		assert_eq!(ok.headers()[header::CONTENT_TYPE], CSV_CONTENT_TYPE);
		assert_eq!(ok.headers()[header::CONTENT_DISPOSITION], CSV_DISPOSITION);

		let bad = csv_response(Err(CsvError::InvalidInput("empty".into())));
		assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

		let failed = csv_response(Err(CsvError::Write("disk".into())));
		assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
