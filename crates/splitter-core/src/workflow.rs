//! Sequencing of a single split run.
//!
//! A run moves through these steps:
//!
//! 1. check the note for a CSV link, skipping the order when there is none
//! 2. fetch and decode the CSV; a failure here aborts the run before any call
//!    to the platform
//! 3. create one child order per row, in file order, one call at a time; a
//!    failed row is recorded and the loop moves on
//! 4. cancel the parent order exactly once, whatever happened in step 3
//!
//! The cancel in step 4 runs even when no child order was created. A cancel
//! failure is logged and reported through [`SplitOutcome::Completed`] only.

use crate::builder::build_child_order;
use crate::note::extract_csv_url;
use splitter_csv::{CsvError, CsvSource};
use splitter_platform::OrderPlatformInterface;
use splitter_types::{CsvRow, Order, RowOutcome};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Errors that abort a split run.
///
/// Per-row failures are not errors at this level; they are reported in-band as
/// [`RowOutcome::Failed`].
#[derive(Debug, Error)]
pub enum SplitError {
	#[error("Failed to load CSV from {url}: {source}")]
	Fetch {
		url: String,
		#[source]
		source: CsvError,
	},
}

/// How a split run ended.
#[derive(Debug)]
pub enum SplitOutcome {
	/// The note had no CSV link; nothing was created or cancelled.
	Skipped,
	/// Every CSV row was attempted and the parent cancellation was attempted.
	Completed {
		/// One entry per CSV row, in file order.
		results: Vec<RowOutcome>,
		parent_cancelled: bool,
	},
}

impl SplitOutcome {
	/// Human-readable summary for the webhook response.
	pub fn summary(&self) -> String {
		match self {
			SplitOutcome::Skipped => "No CSV link found in order note; order left unchanged".to_string(),
			SplitOutcome::Completed { results, .. } => {
				let created = results.iter().filter(|r| r.is_success()).count();
				format!(
					"CSV rows processed: {}, orders created: {}, failed: {}",
					results.len(),
					created,
					results.len() - created
				)
			},
		}
	}
}

/// Runs split workflows against a platform client and a CSV source.
///
/// Holds no per-request state; one instance serves all requests.
pub struct OrderSplitter {
	platform: Arc<dyn OrderPlatformInterface>,
	csv_source: Arc<dyn CsvSource>,
}

impl OrderSplitter {
	pub fn new(platform: Arc<dyn OrderPlatformInterface>, csv_source: Arc<dyn CsvSource>) -> Self {
		Self {
			platform,
			csv_source,
		}
	}

	/// Runs the split workflow for one inbound order.
	#[instrument(skip_all, fields(order_id = order.id, order_name = %order.name, run_id = %Uuid::new_v4()))]
	pub async fn process(&self, order: &Order) -> Result<SplitOutcome, SplitError> {
		let Some(csv_url) = extract_csv_url(order.note_text()) else {
			info!("No CSV link in order note, skipping");
			return Ok(SplitOutcome::Skipped);
		};

		info!("Fetching CSV from {}", csv_url);
		let rows = self
			.csv_source
			.fetch_rows(csv_url)
			.await
			.map_err(|source| SplitError::Fetch {
				url: csv_url.to_string(),
				source,
			})?;

		info!(rows = rows.len(), "Creating child orders");
		let results = self.create_children(order, rows).await;
		let parent_cancelled = self.cancel_parent(order).await;

		Ok(SplitOutcome::Completed {
			results,
			parent_cancelled,
		})
	}

	async fn create_children(&self, parent: &Order, rows: Vec<CsvRow>) -> Vec<RowOutcome> {
		let mut results = Vec::with_capacity(rows.len());

		for (index, row) in rows.into_iter().enumerate() {
			let row_number = index + 1;
			let request = build_child_order(parent, &row, row_number);

			match self.platform.create_order(&request).await {
				Ok(created) => {
					info!(row = row_number, child_id = created.id, "Created child order {}", created.name);
					results.push(RowOutcome::created(
						created.name,
						request.order.shipping_address.address1,
					));
				},
				Err(e) => {
					warn!(row = row_number, "Failed to create child order: {}", e);
					results.push(RowOutcome::failed(e.to_string(), row));
				},
			}
		}

		results
	}

	async fn cancel_parent(&self, parent: &Order) -> bool {
		match self.platform.cancel_order(parent.id).await {
			Ok(()) => {
				info!("Cancelled parent order {}", parent.name);
				true
			},
			Err(e) => {
				error!("Failed to cancel parent order {}: {}", parent.name, e);
				false
			},
		}
	}
}
