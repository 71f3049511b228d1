//! Outbound order-creation payloads.
//!
//! A child order is synthesized for every CSV row. It carries the parent's
//! line items, a customer and shipping address built from the row, and tags
//! recording which parent order it was split from.

use crate::order::LineItem;
use serde::{Deserialize, Serialize};

/// Request body for the platform's create-order endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildOrderRequest {
	pub order: ChildOrder,
}

/// The order object nested inside a [`ChildOrderRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildOrder {
	pub line_items: Vec<ChildLineItem>,
	pub customer: Customer,
	pub shipping_address: ShippingAddress,
	pub financial_status: FinancialStatus,
	/// Provenance tag naming the parent order.
	pub tags: String,
	pub note: String,
	/// Children are addressed to recipients who did not place the order.
	pub send_receipt: bool,
	pub send_fulfillment_receipt: bool,
}

/// Financial state assigned to created child orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
	Paid,
}

/// A line item on a child order.
///
/// Variant-backed items are referenced by variant id; custom items have no
/// variant and are recreated from their title and price instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildLineItem {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub variant_id: Option<u64>,
	pub quantity: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<String>,
}

impl From<&LineItem> for ChildLineItem {
	fn from(item: &LineItem) -> Self {
		match item.variant_id {
			Some(variant_id) => Self {
				variant_id: Some(variant_id),
				quantity: item.quantity,
				title: None,
				price: None,
			},
			None => Self {
				variant_id: None,
				quantity: item.quantity,
				title: item.title.clone(),
				price: item.price.clone(),
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
	pub first_name: String,
	pub last_name: String,
	pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
	pub first_name: String,
	pub last_name: String,
	pub address1: String,
	pub address2: String,
	pub city: String,
	/// State or province, taken from the row's `state` column.
	pub province: String,
	pub zip: String,
	pub country: String,
}

/// The subset of the platform's created-order response the workflow reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrder {
	pub id: u64,
	pub name: String,
}
