//! Main entry point for the CSV order splitter service.
//!
//! This binary serves the CSV export endpoint and the order-creation webhook.
//! When an order's note links to a CSV file, it creates one child order per
//! row and cancels the original order.

use clap::Parser;
use splitter_config::Config;
use splitter_core::OrderSplitter;
use splitter_csv::create_source;
use splitter_platform::create_platform;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;
mod shutdown;
mod signature;

/// Command-line arguments for the splitter service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file. Without it, configuration is read from the environment.
	#[arg(short, long, env = "SPLITTER_CONFIG")]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the splitter service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file or environment
/// 4. Builds the split workflow with its platform client and CSV source
/// 5. Serves HTTP until shut down
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started CSV order splitter");

	let config = load_config(args.config).await?;
	tracing::info!(
		"Loaded configuration [store {} / api {}]",
		config.shopify.store_domain,
		config.shopify.api_version
	);
	if config.webhook.verify_signature {
		tracing::info!("Webhook signature verification enabled");
	}

	let splitter = build_splitter(&config)?;
	let state = server::AppState {
		splitter: Arc::new(splitter),
		webhook_secret: config.webhook.signing_secret().cloned(),
	};

	server::start_server(config.server, state).await?;

	tracing::info!("Stopped CSV order splitter");
	Ok(())
}

async fn load_config(path: Option<PathBuf>) -> Result<Config, splitter_config::ConfigError> {
	match path {
		Some(path) => Config::from_file(&path.to_string_lossy()).await,
		None => Config::from_env(),
	}
}

/// Wires the platform client and CSV source into the split workflow.
fn build_splitter(config: &Config) -> Result<OrderSplitter, Box<dyn std::error::Error>> {
	let platform = create_platform(&config.shopify)?;
	let csv_source = create_source(&config.csv)?;

	Ok(OrderSplitter::new(
		Arc::from(platform),
		Arc::from(csv_source),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const CONFIG: &str = r#"
[server]
port = 8080
on_shutdown = "ignore"

[shopify]
store_domain = "example.myshopify.com"
access_token = "shpat_test"

[webhook]
verify_signature = true
secret = "whsec_test"
"#;

	#[test]
	fn test_args_defaults() {
		let args = Args::parse_from(["csv-order-splitter"]);
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_args_config_path() {
		let args = Args::parse_from(["csv-order-splitter", "--config", "splitter.toml", "-l", "debug"]);
		assert_eq!(args.config, Some(PathBuf::from("splitter.toml")));
		assert_eq!(args.log_level, "debug");
	}

	#[tokio::test]
	async fn test_load_config_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(CONFIG.as_bytes()).unwrap();

		let config = load_config(Some(file.path().to_path_buf())).await.unwrap();
		assert_eq!(config.server.port, 8080);
		assert_eq!(
			config.server.on_shutdown,
			splitter_config::ShutdownMode::Ignore
		);
		assert!(config.webhook.signing_secret().is_some());
	}

	#[tokio::test]
	async fn test_load_config_missing_file() {
		let result = load_config(Some(PathBuf::from("/nonexistent/splitter.toml"))).await;
		assert!(matches!(result, Err(splitter_config::ConfigError::Io(_))));
	}

	#[test]
	fn test_build_splitter() {
		let config: Config = CONFIG.parse().unwrap();
		assert!(build_splitter(&config).is_ok());
	}
}
