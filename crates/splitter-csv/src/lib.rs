//! CSV codec for the order splitter.
//!
//! Two directions are supported. [`encode_records`] turns an array of flat JSON
//! objects into CSV text for download. A [`CsvSource`] fetches a remote CSV file
//! and decodes it into [`CsvRow`]s for the split workflow.

use async_trait::async_trait;
use splitter_config::CsvConfig;
use splitter_types::CsvRow;
use std::time::Duration;
use thiserror::Error;

mod encode;
mod parse;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

pub use encode::encode_records;
pub use parse::parse_rows;

/// Errors that can occur while encoding or decoding CSV data.
#[derive(Debug, Error)]
pub enum CsvError {
	/// The records to encode were not a non-empty array of objects.
	#[error("Invalid input: {0}")]
	InvalidInput(String),
	/// The CSV writer failed.
	#[error("Write error: {0}")]
	Write(String),
	/// The remote CSV could not be retrieved.
	#[error("Fetch error: {0}")]
	Fetch(String),
	/// The retrieved body was not valid CSV.
	#[error("Parse error: {0}")]
	Parse(String),
}

/// Trait defining the interface for remote CSV sources.
///
/// Decoding is all-or-nothing: an implementation returns every row of the file
/// in line order, or an error and no rows.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CsvSource: Send + Sync {
	/// Fetches the CSV at `url` and decodes it using its first line as header.
	async fn fetch_rows(&self, url: &str) -> Result<Vec<CsvRow>, CsvError>;
}

/// Factory function to create the CSV source from configuration.
pub fn create_source(config: &CsvConfig) -> Result<Box<dyn CsvSource>, CsvError> {
	let timeout = config.fetch_timeout_seconds.map(Duration::from_secs);
	let source = implementations::http::HttpCsvSource::new(timeout)?;
	Ok(Box::new(source))
}
