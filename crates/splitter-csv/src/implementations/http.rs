//! HTTP(S) CSV source.
//!
//! Downloads the file with a shared reqwest client (rustls for TLS) and decodes
//! the body with [`parse_rows`](crate::parse_rows).

use crate::{parse_rows, CsvError, CsvSource};
use async_trait::async_trait;
use splitter_types::CsvRow;
use std::time::Duration;

/// CSV source that fetches files over HTTP(S).
pub struct HttpCsvSource {
	client: reqwest::Client,
}

impl HttpCsvSource {
	/// Creates a source; `timeout` bounds each whole fetch when set.
	pub fn new(timeout: Option<Duration>) -> Result<Self, CsvError> {
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		let client = builder
			.build()
			.map_err(|e| CsvError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

		Ok(Self { client })
	}
}

#[async_trait]
impl CsvSource for HttpCsvSource {
	async fn fetch_rows(&self, url: &str) -> Result<Vec<CsvRow>, CsvError> {
		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| CsvError::Fetch(format!("Failed to request {}: {}", url, e)))?;

		let status = response.status();
		if !status.is_success() {
			return Err(CsvError::Fetch(format!("{} returned HTTP {}", url, status)));
		}

		let body = response
			.bytes()
			.await
			.map_err(|e| CsvError::Fetch(format!("Failed to read body of {}: {}", url, e)))?;

		let rows = parse_rows(&body)?;
		tracing::debug!(rows = rows.len(), "Fetched CSV from {}", url);
		Ok(rows)
	}
}
