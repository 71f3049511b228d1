//! Child order synthesis from a parent order and one CSV row.

use splitter_types::{
	columns, ChildLineItem, ChildOrder, ChildOrderRequest, CsvRow, Customer, FinancialStatus,
	Order, ShippingAddress,
};

/// Used when a row has no `name`.
pub const DEFAULT_RECIPIENT_NAME: &str = "Gift Recipient";
/// Used when a name has a single token.
pub const DEFAULT_LAST_NAME: &str = "Recipient";
/// Used when a row has no `email`.
pub const PLACEHOLDER_EMAIL: &str = "placeholder@example.com";
/// Child orders always ship domestically.
pub const SHIPPING_COUNTRY: &str = "United States";

/// Splits a full name on single spaces into first and last name.
///
/// The first token is the first name and the remaining tokens, joined back
/// with spaces, are the last name. A single-token name gets
/// [`DEFAULT_LAST_NAME`].
pub fn split_name(full_name: &str) -> (String, String) {
	let mut tokens = full_name.split(' ');
	let first_name = tokens.next().unwrap_or_default().to_string();
	let last_name = tokens.collect::<Vec<_>>().join(" ");

	if last_name.is_empty() {
		(first_name, DEFAULT_LAST_NAME.to_string())
	} else {
		(first_name, last_name)
	}
}

/// Builds the create-order request for the `row_number`-th (1-based) CSV row.
pub fn build_child_order(parent: &Order, row: &CsvRow, row_number: usize) -> ChildOrderRequest {
	let text = |column: &str| row.field(column).unwrap_or_default().to_string();

	let (first_name, last_name) =
		split_name(row.field(columns::NAME).unwrap_or(DEFAULT_RECIPIENT_NAME));

	ChildOrderRequest {
		order: ChildOrder {
			line_items: parent.line_items.iter().map(ChildLineItem::from).collect(),
			customer: Customer {
				first_name: first_name.clone(),
				last_name: last_name.clone(),
				email: row
					.field(columns::EMAIL)
					.unwrap_or(PLACEHOLDER_EMAIL)
					.to_string(),
			},
			shipping_address: ShippingAddress {
				first_name,
				last_name,
				address1: text(columns::ADDRESS1),
				address2: text(columns::ADDRESS2),
				city: text(columns::CITY),
				province: text(columns::STATE),
				zip: text(columns::ZIP),
				country: SHIPPING_COUNTRY.to_string(),
			},
			financial_status: FinancialStatus::Paid,
			tags: format!("Split from {} ({})", parent.name, parent.id),
			note: format!(
				"Created from CSV row {} of order {}",
				row_number, parent.name
			),
			send_receipt: false,
			send_fulfillment_receipt: false,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use splitter_types::LineItem;

	fn parent() -> Order {
		Order {
			id: 1001,
			name: "#1001".to_string(),
			note: Some("see https://cdn.example.com/list.csv".to_string()),
			line_items: vec![
				LineItem {
					variant_id: Some(39072856),
					quantity: 2,
					title: Some("Candle".to_string()),
					price: Some("18.00".to_string()),
				},
				LineItem {
					variant_id: None,
					quantity: 1,
					title: Some("Card".to_string()),
					price: Some("3.00".to_string()),
				},
			],
		}
	}

	#[test]
	fn test_split_name() {
		assert_eq!(split_name("Jane Doe"), ("Jane".to_string(), "Doe".to_string()));
		assert_eq!(split_name("Bob"), ("Bob".to_string(), "Recipient".to_string()));
		assert_eq!(
			split_name("Mary Ann van Dyke"),
			("Mary".to_string(), "Ann van Dyke".to_string())
		);
		assert_eq!(
			split_name("Gift Recipient"),
			("Gift".to_string(), "Recipient".to_string())
		);
	}

	#[test]
	fn test_full_row() {
		let row: CsvRow = [
			("name", "Jane Doe"),
			("email", "jane@x.com"),
			("address1", "1 Main St"),
			("address2", "Apt 4"),
			("city", "Austin"),
			("state", "TX"),
			("zip", "73301"),
			("gift_message", "ignored"),
		]
		.into_iter()
		.collect();

		let request = build_child_order(&parent(), &row, 1);
		let order = &request.order;

		assert_eq!(
			order.customer,
			Customer {
				first_name: "Jane".into(),
				last_name: "Doe".into(),
				email: "jane@x.com".into(),
			}
		);
		assert_eq!(
			order.shipping_address,
			ShippingAddress {
				first_name: "Jane".into(),
				last_name: "Doe".into(),
				address1: "1 Main St".into(),
				address2: "Apt 4".into(),
				city: "Austin".into(),
				province: "TX".into(),
				zip: "73301".into(),
				country: "United States".into(),
			}
		);
		assert_eq!(order.financial_status, FinancialStatus::Paid);
		assert_eq!(order.tags, "Split from #1001 (1001)");
		assert_eq!(order.note, "Created from CSV row 1 of order #1001");
		assert!(!order.send_receipt);
	}

	#[test]
	fn test_line_items_copied_from_parent() {
		let request = build_child_order(&parent(), &CsvRow::default(), 3);
		let items = &request.order.line_items;

		assert_eq!(items.len(), 2);
		assert_eq!(items[0].variant_id, Some(39072856));
		assert_eq!(items[0].quantity, 2);
		assert_eq!(items[1].variant_id, None);
		assert_eq!(items[1].title.as_deref(), Some("Card"));
	}

	#[test]
	fn test_missing_columns_fall_back_to_defaults() {
		let row: CsvRow = [("name", ""), ("city", "Dallas")].into_iter().collect();

		let order = build_child_order(&parent(), &row, 2).order;
		assert_eq!(order.customer.first_name, "Gift");
		assert_eq!(order.customer.last_name, "Recipient");
		assert_eq!(order.customer.email, PLACEHOLDER_EMAIL);
		assert_eq!(order.shipping_address.address1, "");
		assert_eq!(order.shipping_address.city, "Dallas");
		assert_eq!(order.shipping_address.country, SHIPPING_COUNTRY);
	}
}
