//! Per-row results of a split run.

use crate::csv_row::CsvRow;
use serde::Serialize;

/// Result of submitting one CSV row as a child order.
///
/// Serialized untagged with an explicit `success` flag so callers can tell the
/// two shapes apart:
///
/// ```json
/// {"success": true, "orderName": "#1002", "address": "1 Main St"}
/// {"success": false, "error": "...", "row": {"name": "..."}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowOutcome {
	Created {
		success: bool,
		#[serde(rename = "orderName")]
		order_name: String,
		address: String,
	},
	Failed {
		success: bool,
		error: String,
		row: CsvRow,
	},
}

impl RowOutcome {
	pub fn created(order_name: impl Into<String>, address: impl Into<String>) -> Self {
		RowOutcome::Created {
			success: true,
			order_name: order_name.into(),
			address: address.into(),
		}
	}

	pub fn failed(error: impl Into<String>, row: CsvRow) -> Self {
		RowOutcome::Failed {
			success: false,
			error: error.into(),
			row,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, RowOutcome::Created { .. })
	}
}
