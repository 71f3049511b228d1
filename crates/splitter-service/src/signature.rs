//! Webhook signature verification.
//!
//! The platform signs each webhook with HMAC-SHA256 over the raw request body,
//! keyed with the shared webhook secret, and sends the base64 digest in the
//! `X-Shopify-Hmac-Sha256` header.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use splitter_types::SecretString;

pub const SIGNATURE_HEADER: &str = "x-shopify-hmac-sha256";

type HmacSha256 = Hmac<Sha256>;

/// Returns true when `signature` is the base64 HMAC of `body` under `secret`.
///
/// The digest comparison is constant time. A missing or malformed header is
/// treated as a mismatch.
pub fn verify_signature(secret: &SecretString, body: &[u8], signature: Option<&str>) -> bool {
	let Some(signature) = signature else {
		return false;
	};
	let Ok(expected) = STANDARD.decode(signature.trim()) else {
		return false;
	};
	let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()) else {
		return false;
	};

	mac.update(body);
	mac.verify_slice(&expected).is_ok()
}
