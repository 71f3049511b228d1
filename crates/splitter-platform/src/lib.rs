//! Order-management platform client for the splitter.
//!
//! The split workflow needs two operations from the platform: create an order
//! and cancel an order. Both go through [`OrderPlatformInterface`] so the
//! workflow can be driven by the real admin API or by a test double.
//! Every call is a single attempt; nothing here retries.

use async_trait::async_trait;
use splitter_config::ShopifyConfig;
use splitter_types::{ChildOrderRequest, CreatedOrder};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod shopify;
}

/// Errors that can occur when calling the platform.
#[derive(Debug, Error)]
pub enum PlatformError {
	/// The request never produced an HTTP response.
	#[error("Network error: {0}")]
	Network(String),
	/// The platform answered with a non-success status.
	#[error("Platform API error ({status}): {message}")]
	Api { status: u16, message: String },
	/// The platform's success response did not have the expected shape.
	#[error("Decode error: {0}")]
	Decode(String),
	/// The client could not be constructed.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the order operations the split workflow performs.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait OrderPlatformInterface: Send + Sync {
	/// Creates an order and returns its identifier and display name.
	async fn create_order(&self, request: &ChildOrderRequest)
		-> Result<CreatedOrder, PlatformError>;

	/// Cancels the order with the given identifier.
	async fn cancel_order(&self, order_id: u64) -> Result<(), PlatformError>;
}

/// Factory function to create the admin API client from configuration.
pub fn create_platform(
	config: &ShopifyConfig,
) -> Result<Box<dyn OrderPlatformInterface>, PlatformError> {
	let client = implementations::shopify::ShopifyAdminClient::from_config(config)?;
	Ok(Box::new(client))
}
