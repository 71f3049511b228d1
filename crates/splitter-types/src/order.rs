//! Inbound order payloads.
//!
//! The platform posts its full order object to the webhook; only the fields the
//! split workflow needs are modelled here and everything else is ignored.

use serde::{Deserialize, Serialize};

/// An order as delivered by the order-creation webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Platform identifier, used for cancellation.
	pub id: u64,
	/// Display name such as `#1001`.
	#[serde(default)]
	pub name: String,
	/// Free-text note; the platform sends `null` when it is unset.
	#[serde(default)]
	pub note: Option<String>,
	/// Purchased line items, copied onto every child order.
	#[serde(default)]
	pub line_items: Vec<LineItem>,
}

/// A single purchased line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
	/// Product variant; `null` for custom line items.
	#[serde(default)]
	pub variant_id: Option<u64>,
	#[serde(default = "default_quantity")]
	pub quantity: u32,
	/// Title, only forwarded for custom line items.
	#[serde(default)]
	pub title: Option<String>,
	/// Unit price as a decimal string, only forwarded for custom line items.
	#[serde(default)]
	pub price: Option<String>,
}

fn default_quantity() -> u32 {
	1
}

impl Order {
	/// Returns the note text, or an empty string when none was set.
	pub fn note_text(&self) -> &str {
		self.note.as_deref().unwrap_or_default()
	}
}
