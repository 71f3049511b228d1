//! CSV rows keyed by header column.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column names the split workflow reads from a row.
pub mod columns {
	pub const NAME: &str = "name";
	pub const EMAIL: &str = "email";
	pub const ADDRESS1: &str = "address1";
	pub const ADDRESS2: &str = "address2";
	pub const CITY: &str = "city";
	pub const STATE: &str = "state";
	pub const ZIP: &str = "zip";
}

/// One data line of a CSV file, mapping header column to raw cell value.
///
/// Columns keep file order. Serializes as a flat JSON object so a failed row
/// can be echoed back to the caller exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvRow(IndexMap<String, String>);

impl CsvRow {
	/// Returns the trimmed value of `column`.
	///
	/// Blank cells are reported as absent so callers can fall back to defaults
	/// with `unwrap_or`.
	pub fn field(&self, column: &str) -> Option<&str> {
		self.0
			.get(column)
			.map(|value| value.trim())
			.filter(|value| !value.is_empty())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(column, value)| (column.into(), value.into()))
				.collect(),
		)
	}
}
