//! Configuration module for the CSV order splitter.
//!
//! Configuration is read once at startup and handed to the HTTP surface and the
//! split workflow; nothing reads the environment mid-request. Two sources are
//! supported:
//!
//! - a TOML file, where `${VAR}` and `${VAR:-default}` are replaced from the
//!   environment before parsing
//! - the environment alone (`SHOPIFY_STORE_DOMAIN`, `SHOPIFY_ACCESS_TOKEN`,
//!   `PORT`, `SHOPIFY_API_VERSION`, `SHOPIFY_WEBHOOK_SECRET`)
//!
//! Both paths end in the same validation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use splitter_types::SecretString;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable names read by [`Config::from_env`].
pub mod env {
	pub const STORE_DOMAIN: &str = "SHOPIFY_STORE_DOMAIN";
	pub const ACCESS_TOKEN: &str = "SHOPIFY_ACCESS_TOKEN";
	pub const API_VERSION: &str = "SHOPIFY_API_VERSION";
	pub const WEBHOOK_SECRET: &str = "SHOPIFY_WEBHOOK_SECRET";
	pub const PORT: &str = "PORT";
}

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message only; the default Display dumps the whole input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the splitter service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// HTTP listener settings.
	#[serde(default)]
	pub server: ServerConfig,
	/// Order-management platform credentials and API settings.
	pub shopify: ShopifyConfig,
	/// Remote CSV fetching.
	#[serde(default)]
	pub csv: CsvConfig,
	/// Inbound webhook authenticity checks.
	#[serde(default)]
	pub webhook: WebhookConfig,
}

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	/// Host address to bind to. Defaults to all interfaces.
	#[serde(default = "default_host")]
	pub host: String,
	/// Port to bind to. Defaults to 3000.
	#[serde(default = "default_port")]
	pub port: u16,
	/// Maximum accepted request body in bytes.
	#[serde(default = "default_max_request_size")]
	pub max_request_size: usize,
	/// What to do when a termination signal arrives.
	#[serde(default)]
	pub on_shutdown: ShutdownMode,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
			max_request_size: default_max_request_size(),
			on_shutdown: ShutdownMode::default(),
		}
	}
}

/// Behaviour on SIGINT/SIGTERM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutdownMode {
	/// Stop accepting connections and let in-flight requests finish.
	#[default]
	Drain,
	/// Log the signal and keep serving.
	Ignore,
}

/// Configuration for the order-management platform's admin API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShopifyConfig {
	/// Store hostname, e.g. `example.myshopify.com`, without scheme.
	pub store_domain: String,
	/// Admin API access token sent on every outbound call.
	pub access_token: SecretString,
	/// Admin API version path segment.
	#[serde(default = "default_api_version")]
	pub api_version: String,
	/// Per-request timeout. Unset means the client never times out.
	#[serde(default)]
	pub request_timeout_seconds: Option<u64>,
}

impl ShopifyConfig {
	/// Base URL of the versioned admin REST API, without a trailing slash.
	pub fn admin_base_url(&self) -> String {
		format!(
			"https://{}/admin/api/{}",
			self.store_domain, self.api_version
		)
	}
}

/// Configuration for fetching CSV files referenced from order notes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CsvConfig {
	/// Per-fetch timeout. Unset means the client never times out.
	#[serde(default)]
	pub fetch_timeout_seconds: Option<u64>,
}

/// Configuration for webhook signature verification.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhookConfig {
	/// Reject webhooks whose HMAC header does not match the body.
	#[serde(default)]
	pub verify_signature: bool,
	/// Shared signing secret, required when verification is on.
	#[serde(default)]
	pub secret: Option<SecretString>,
}

impl WebhookConfig {
	/// Returns the signing secret when verification is enabled.
	pub fn signing_secret(&self) -> Option<&SecretString> {
		if self.verify_signature {
			self.secret.as_ref()
		} else {
			None
		}
	}
}

fn default_host() -> String {
	"0.0.0.0".to_string()
}

fn default_port() -> u16 {
	3000
}

fn default_api_version() -> String {
	"2024-01".to_string()
}

fn default_max_request_size() -> usize {
	1024 * 1024 // 1MB
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of `VAR_NAME`, or with `default` for
/// `${VAR_NAME:-default}` when the variable is unset. Inputs over 1MB are
/// rejected before the regex runs.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	resolve_with(input, |name| std::env::var(name).ok())
}

fn resolve_with<F>(input: &str, lookup: F) -> Result<String, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut resolved = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};

		let value = match (lookup(name.as_str()), cap.get(2)) {
			(Some(value), _) => value,
			(None, Some(default)) => default.as_str().to_string(),
			(None, None) => {
				return Err(ConfigError::Validation(format!(
					"Environment variable '{}' not found",
					name.as_str()
				)));
			},
		};

		resolved.push_str(&input[last_end..full_match.start()]);
		resolved.push_str(&value);
		last_end = full_match.end();
	}
	resolved.push_str(&input[last_end..]);

	Ok(resolved)
}

impl Config {
	/// Loads configuration from a TOML file, resolving environment variables.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Builds configuration from process environment variables only.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds configuration from an arbitrary variable lookup.
	///
	/// A non-empty `SHOPIFY_WEBHOOK_SECRET` turns signature verification on.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required = |name: &str| {
			lookup(name).ok_or_else(|| {
				ConfigError::Validation(format!("Environment variable '{}' not found", name))
			})
		};

		let port = match lookup(env::PORT) {
			Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
				ConfigError::Validation(format!("Invalid {} '{}': {}", env::PORT, raw, e))
			})?,
			None => default_port(),
		};

		let secret = lookup(env::WEBHOOK_SECRET)
			.filter(|s| !s.trim().is_empty())
			.map(SecretString::new);

		let config = Config {
			server: ServerConfig {
				port,
				..ServerConfig::default()
			},
			shopify: ShopifyConfig {
				store_domain: required(env::STORE_DOMAIN)?,
				access_token: SecretString::new(required(env::ACCESS_TOKEN)?),
				api_version: lookup(env::API_VERSION).unwrap_or_else(default_api_version),
				request_timeout_seconds: None,
			},
			csv: CsvConfig::default(),
			webhook: WebhookConfig {
				verify_signature: secret.is_some(),
				secret,
			},
		};

		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// - Store domain is a bare hostname
	/// - Access token is not empty
	/// - API version looks like `YYYY-MM`
	/// - Port and timeouts are non-zero
	/// - Signature verification has a secret to verify with
	fn validate(&self) -> Result<(), ConfigError> {
		let domain = self.shopify.store_domain.trim();
		if domain.is_empty() {
			return Err(ConfigError::Validation(
				"Shopify store_domain cannot be empty".into(),
			));
		}
		if domain.contains("://") || domain.contains('/') {
			return Err(ConfigError::Validation(format!(
				"Shopify store_domain must be a bare hostname, got '{}'",
				domain
			)));
		}

		if self.shopify.access_token.is_empty() {
			return Err(ConfigError::Validation(
				"Shopify access_token cannot be empty".into(),
			));
		}

		let version_re = Regex::new(r"^\d{4}-\d{2}$")
			.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;
		if !version_re.is_match(&self.shopify.api_version) {
			return Err(ConfigError::Validation(format!(
				"Shopify api_version must look like YYYY-MM, got '{}'",
				self.shopify.api_version
			)));
		}

		if self.server.port == 0 {
			return Err(ConfigError::Validation(
				"Server port must be greater than 0".into(),
			));
		}
		if self.server.max_request_size == 0 {
			return Err(ConfigError::Validation(
				"Server max_request_size must be greater than 0".into(),
			));
		}

		if self.shopify.request_timeout_seconds == Some(0) {
			return Err(ConfigError::Validation(
				"Shopify request_timeout_seconds must be greater than 0".into(),
			));
		}
		if self.csv.fetch_timeout_seconds == Some(0) {
			return Err(ConfigError::Validation(
				"CSV fetch_timeout_seconds must be greater than 0".into(),
			));
		}

		if self.webhook.verify_signature
			&& self.webhook.secret.as_ref().is_none_or(|s| s.is_empty())
		{
			return Err(ConfigError::Validation(
				"Webhook verify_signature requires a non-empty secret".into(),
			));
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string with environment variable resolution.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
