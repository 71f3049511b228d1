//! Encoding of JSON records into CSV text.

use crate::CsvError;
use serde_json::{Map, Value};

/// Encodes an array of flat JSON objects as CSV.
///
/// The header is the key set of the first record, in document order. Every
/// record is written against that header: missing keys become empty cells and
/// keys absent from the first record are dropped. A first record with no keys
/// gives a document with no columns: an empty header line and one empty line
/// per record.
///
/// # Errors
///
/// Returns [`CsvError::InvalidInput`] when `records` is not an array, is empty,
/// or contains something other than an object.
pub fn encode_records(records: &Value) -> Result<String, CsvError> {
	let records = records
		.as_array()
		.ok_or_else(|| CsvError::InvalidInput("expected a JSON array of records".into()))?;

	let first = records
		.first()
		.ok_or_else(|| CsvError::InvalidInput("expected at least one record".into()))?;
	let columns: Vec<&str> = as_record(first, 0)?.keys().map(String::as_str).collect();
	if columns.is_empty() {
		// The csv writer renders a zero-field record as `""`, so write the lines directly
		for (index, record) in records.iter().enumerate() {
			as_record(record, index)?;
		}
		return Ok("\n".repeat(records.len() + 1));
	}

	let mut writer = csv::Writer::from_writer(Vec::new());
	writer
		.write_record(&columns)
		.map_err(|e| CsvError::Write(e.to_string()))?;

	for (index, record) in records.iter().enumerate() {
		let fields = as_record(record, index)?;
		writer
			.write_record(columns.iter().map(|column| render_cell(fields.get(*column))))
			.map_err(|e| CsvError::Write(e.to_string()))?;
	}

	let bytes = writer
		.into_inner()
		.map_err(|e| CsvError::Write(e.to_string()))?;
	String::from_utf8(bytes).map_err(|e| CsvError::Write(e.to_string()))
}

fn as_record(value: &Value, index: usize) -> Result<&Map<String, Value>, CsvError> {
	value
		.as_object()
		.ok_or_else(|| CsvError::InvalidInput(format!("record {} is not an object", index)))
}

fn render_cell(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(Value::Bool(b)) => b.to_string(),
		Some(Value::Number(n)) => n.to_string(),
		// Nested values are not flat; keep them readable as compact JSON
		Some(nested) => nested.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_header_follows_first_record_order() {
		let records = json!([
			{"order": "#1001", "total": 25.5, "paid": true},
			{"order": "#1002", "total": 10, "paid": false}
		]);

		let csv = encode_records(&records).unwrap();
		assert_eq!(csv, "order,total,paid\n#1001,25.5,true\n#1002,10,false\n");
	}

	#[test]
	fn test_ragged_records_use_first_record_columns() {
		let records = json!([
			{"name": "Jane", "city": "Austin"},
			{"name": "Bob", "zip": "75201"},
			{"city": "Dallas", "name": null}
		]);

		let csv = encode_records(&records).unwrap();
		assert_eq!(csv, "name,city\nJane,Austin\nBob,\n,Dallas\n");
	}

	#[test]
	fn test_values_are_quoted_when_needed() {
		let records = json!([
			{"note": "ships, fragile", "quote": "say \"hi\"", "tags": ["a", "b"]}
		]);

		let csv = encode_records(&records).unwrap();
		assert_eq!(
			csv,
			"note,quote,tags\n\"ships, fragile\",\"say \"\"hi\"\"\",\"[\"\"a\"\",\"\"b\"\"]\"\n"
		);
	}

	#[test]
	fn test_decoding_encoded_output_recovers_values() {
		let records = json!([
			{"name": "Jane Doe", "address1": "1 Main St, Apt 2", "zip": "73301"},
			{"name": "Bob", "address1": "2 Oak Rd", "zip": "75201"}
		]);

		let csv = encode_records(&records).unwrap();
		let rows = crate::parse_rows(csv.as_bytes()).unwrap();

		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].field("address1"), Some("1 Main St, Apt 2"));
		assert_eq!(rows[1].field("name"), Some("Bob"));
		assert_eq!(rows[1].field("zip"), Some("75201"));
	}

	#[test]
	fn test_empty_array_is_invalid() {
		let result = encode_records(&json!([]));
		assert!(matches!(result, Err(CsvError::InvalidInput(_))));
	}

	#[test]
	fn test_non_array_is_invalid() {
		for input in [json!({"name": "Jane"}), json!("name,city"), json!(null), json!(7)] {
			let result = encode_records(&input);
			assert!(
				matches!(result, Err(CsvError::InvalidInput(_))),
				"expected invalid input for {}",
				input
			);
		}
	}

	#[test]
	fn test_non_object_record_is_invalid() {
		let result = encode_records(&json!([{"name": "Jane"}, ["Bob"]]));
		match result {
			Err(CsvError::InvalidInput(message)) => assert!(message.contains("record 1")),
			other => panic!("expected invalid input, got {:?}", other),
		}
	}

	#[test]
	fn test_first_record_without_fields_has_no_columns() {
		assert_eq!(encode_records(&json!([{}])).unwrap(), "\n\n");
		assert_eq!(
			encode_records(&json!([{}, {"name": "Jane"}])).unwrap(),
			"\n\n\n"
		);
	}

	#[test]
	fn test_first_record_without_fields_still_checks_records() {
		let result = encode_records(&json!([{}, "Jane"]));
		assert!(matches!(result, Err(CsvError::InvalidInput(_))));
	}
}
