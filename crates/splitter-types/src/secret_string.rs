//! Credential wrapper that never prints its contents.
//!
//! The platform access token and the webhook signing secret are held as
//! `SecretString` so they stay out of logs, debug output and serialized config.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

const REDACTED: &str = "***REDACTED***";

/// A string that is zeroed on drop and redacted when formatted or serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Returns the secret value. Callers must not log the result.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString({})", REDACTED)
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_access_token_is_redacted() {
		let token = SecretString::from("shpat_0123456789abcdef");

		assert_eq!(format!("{}", token), REDACTED);
		assert!(!format!("{:?}", token).contains("shpat_"));
		assert_eq!(
			serde_json::to_value(&token).unwrap(),
			serde_json::json!(REDACTED)
		);
		assert_eq!(token.expose_secret(), "shpat_0123456789abcdef");
	}

	#[test]
	fn test_whitespace_only_secret_is_empty() {
		assert!(SecretString::from("  ").is_empty());
		assert!(!SecretString::from("s3cret").is_empty());
	}
}
