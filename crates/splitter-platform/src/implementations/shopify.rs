//! Shopify Admin REST API client.
//!
//! Implements [`OrderPlatformInterface`] against the versioned admin endpoints:
//!
//! - `POST {base}/orders.json` creates an order
//! - `POST {base}/orders/{id}/cancel.json` cancels an order
//!
//! where `{base}` is `https://<store>/admin/api/<version>`. Every request carries
//! the access token header and a JSON body.

use crate::{OrderPlatformInterface, PlatformError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use splitter_config::ShopifyConfig;
use splitter_types::{ChildOrderRequest, CreatedOrder, SecretString};
use std::time::Duration;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Envelope of the create-order response.
#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
	order: CreatedOrder,
}

/// Admin API client backed by a pooled reqwest client.
pub struct ShopifyAdminClient {
	client: reqwest::Client,
	/// Versioned admin API root, without a trailing slash.
	base_url: String,
	access_token: SecretString,
}

impl ShopifyAdminClient {
	/// Creates a client for the given admin API root.
	///
	/// `timeout` bounds each request when set; otherwise requests wait as long
	/// as the platform takes.
	pub fn new(
		base_url: impl Into<String>,
		access_token: SecretString,
		timeout: Option<Duration>,
	) -> Result<Self, PlatformError> {
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		let client = builder.build().map_err(|e| {
			PlatformError::Configuration(format!("Failed to build HTTP client: {}", e))
		})?;

		Ok(Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			access_token,
		})
	}

	pub fn from_config(config: &ShopifyConfig) -> Result<Self, PlatformError> {
		Self::new(
			config.admin_base_url(),
			config.access_token.clone(),
			config.request_timeout_seconds.map(Duration::from_secs),
		)
	}

	fn orders_url(&self) -> String {
		format!("{}/orders.json", self.base_url)
	}

	fn cancel_url(&self, order_id: u64) -> String {
		format!("{}/orders/{}/cancel.json", self.base_url, order_id)
	}

	/// Posts a JSON body and returns the response if its status is a success.
	async fn post_json<B: Serialize + ?Sized>(
		&self,
		url: &str,
		body: &B,
	) -> Result<reqwest::Response, PlatformError> {
		let response = self
			.client
			.post(url)
			.header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
			.json(body)
			.send()
			.await
			.map_err(|e| PlatformError::Network(e.to_string()))?;

		if response.status().is_success() {
			return Ok(response);
		}

		let status = response.status().as_u16();
		let body = response.text().await.unwrap_or_default();
		Err(PlatformError::Api {
			status,
			message: error_message(status, &body),
		})
	}
}

/// Extracts a readable message from an admin API error body.
///
/// The platform reports failures as `{"errors": ...}` where the value is either
/// a string or an object of field name to message list. Anything else is
/// reduced to the status code so raw upstream bodies never travel further.
fn error_message(status: u16, body: &str) -> String {
	let errors = serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|json| json.get("errors").cloned());

	match errors {
		Some(Value::String(message)) => message,
		Some(Value::Object(fields)) => fields
			.iter()
			.map(|(field, messages)| match messages {
				Value::Array(list) => format!(
					"{} {}",
					field,
					list.iter()
						.map(|m| m.as_str().map(String::from).unwrap_or_else(|| m.to_string()))
						.collect::<Vec<_>>()
						.join(", ")
				),
				other => format!("{} {}", field, other),
			})
			.collect::<Vec<_>>()
			.join("; "),
		Some(Value::Array(list)) => list
			.iter()
			.map(|m| m.as_str().map(String::from).unwrap_or_else(|| m.to_string()))
			.collect::<Vec<_>>()
			.join("; "),
		_ => format!("request failed with status code {}", status),
	}
}

#[async_trait]
impl OrderPlatformInterface for ShopifyAdminClient {
	async fn create_order(
		&self,
		request: &ChildOrderRequest,
	) -> Result<CreatedOrder, PlatformError> {
		let response = self.post_json(&self.orders_url(), request).await?;

		let created: CreateOrderResponse = response
			.json()
			.await
			.map_err(|e| PlatformError::Decode(format!("Invalid create-order response: {}", e)))?;

		tracing::debug!(order_id = created.order.id, "Created order {}", created.order.name);
		Ok(created.order)
	}

	async fn cancel_order(&self, order_id: u64) -> Result<(), PlatformError> {
		self.post_json(&self.cancel_url(order_id), &serde_json::json!({}))
			.await?;

		tracing::debug!(order_id, "Cancelled order");
		Ok(())
	}
}
