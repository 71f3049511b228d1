//! HTTP server for the CSV order splitter.
//!
//! Exposes the CSV export endpoint, the order webhook and two liveness routes.

use crate::apis::{
	csv_export::{csv_response, generate_csv},
	webhook::{process_order_webhook, WebhookError},
};
use crate::shutdown::shutdown_signal;
use crate::signature::SIGNATURE_HEADER;
use axum::{
	body::Bytes,
	extract::{DefaultBodyLimit, State},
	http::HeaderMap,
	response::{Json, Response},
	routing::{get, post},
	Router,
};
use splitter_config::ServerConfig;
use splitter_core::OrderSplitter;
use splitter_types::{SecretString, SplitResponse};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const STATUS_TEXT: &str = "CSV order splitter is running";

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Split workflow shared by every webhook request.
	pub splitter: Arc<OrderSplitter>,
	/// Set when webhook signatures must be verified.
	pub webhook_secret: Option<SecretString>,
}

/// Builds the application router.
pub fn router(state: AppState, max_request_size: usize) -> Router {
	Router::new()
		.route("/", get(handle_root))
		.route("/health", get(handle_health))
		.route("/generate-csv", post(handle_generate_csv))
		.route("/process-csv-orders", post(handle_process_orders))
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive())
				.layer(DefaultBodyLimit::max(max_request_size)),
		)
		.with_state(state)
}

/// Starts the HTTP server and runs it until the shutdown signal resolves.
pub async fn start_server(
	server_config: ServerConfig,
	state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(state, server_config.max_request_size);

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("CSV order splitter listening on {}", bind_address);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal(server_config.on_shutdown))
		.await?;

	Ok(())
}

async fn handle_root() -> &'static str {
	STATUS_TEXT
}

async fn handle_health() -> &'static str {
	"OK"
}

/// Handles POST /generate-csv requests.
async fn handle_generate_csv(body: Bytes) -> Response {
	csv_response(generate_csv(&body))
}

/// Handles POST /process-csv-orders requests.
///
/// This is the webhook target for order creation. Any error is logged here and
/// turned into a JSON error body.
async fn handle_process_orders(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<SplitResponse>, WebhookError> {
	let signature = headers
		.get(SIGNATURE_HEADER)
		.and_then(|value| value.to_str().ok());

	match process_order_webhook(
		&state.splitter,
		state.webhook_secret.as_ref(),
		signature,
		&body,
	)
	.await
	{
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			match &e {
				WebhookError::Split(_) => tracing::error!("Order split failed: {}", e),
				_ => tracing::warn!("Rejected webhook: {}", e),
			}
			Err(e)
		},
	}
}
