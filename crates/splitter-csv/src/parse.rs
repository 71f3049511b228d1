//! Decoding of CSV bytes into rows.

use crate::CsvError;
use splitter_types::CsvRow;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Decodes CSV bytes into rows keyed by the header line.
///
/// Records shorter than the header omit their trailing columns; extra fields
/// beyond the header are dropped. Records whose fields are all blank are skipped.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<CsvRow>, CsvError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.from_reader(bytes);

	let headers: Vec<String> = reader
		.headers()
		.map_err(|e| CsvError::Parse(e.to_string()))?
		.iter()
		.map(|header| header.trim_start_matches(BYTE_ORDER_MARK).trim().to_string())
		.collect();

	let mut rows = Vec::new();
	for record in reader.records() {
		let record = record.map_err(|e| CsvError::Parse(e.to_string()))?;
		if record.iter().all(|field| field.trim().is_empty()) {
			continue;
		}

		rows.push(
			headers
				.iter()
				.zip(record.iter())
				.map(|(header, value)| (header.as_str(), value))
				.collect(),
		);
	}

	Ok(rows)
}
