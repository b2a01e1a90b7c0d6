//! Adapter configuration and environment-dependent endpoint resolution.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, error::ConfigError};

/// OAuth scope requested during the client-credentials exchange.
pub const OAUTH_SCOPE: &str = "grab_express.partner_deliveries";

const SANDBOX_TOKEN_ENDPOINT: &str = "https://api.stg-myteksi.com/grabid/v1/oauth2/token";
const PRODUCTION_TOKEN_ENDPOINT: &str = "https://partner-api.grab.com/grabid/v1/oauth2/token";
const SANDBOX_API_BASE: &str = "https://partner-api.stg-myteksi.com/grab-express-sandbox";
const PRODUCTION_API_BASE: &str = "https://partner-api.grab.com/grab-express";
const CACHE_KEY_PREFIX: &str = "grab-express-adapter";

/// Validated credential pair supplied once at adapter construction.
#[derive(Clone, Deserialize)]
pub struct AdapterConfig {
	/// OAuth client identifier issued by the courier.
	pub client_id: String,
	/// OAuth client secret issued by the courier.
	pub client_secret: String,
	/// Selects the courier's staging environment when `true`.
	#[serde(default)]
	pub sandbox: bool,
}
impl AdapterConfig {
	/// Builds a configuration targeting the production environment.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into(), sandbox: false }
	}

	/// Overrides the sandbox flag.
	pub fn with_sandbox(mut self, sandbox: bool) -> Self {
		self.sandbox = sandbox;

		self
	}

	/// Validates the untyped configuration object handed over by the platform.
	///
	/// Fails with the first offending field, matching the platform's
	/// installation-time validation contract.
	pub fn from_value(value: &serde_json::Value) -> Result<Self, ConfigError> {
		let client_id = require_string(value, "client_id")?;
		let client_secret = require_string(value, "client_secret")?;
		let sandbox = match value.get("sandbox") {
			None | Some(serde_json::Value::Null) => false,
			Some(serde_json::Value::Bool(flag)) => *flag,
			Some(_) => return Err(ConfigError::FieldType { field: "sandbox", expected: "boolean" }),
		};

		Ok(Self { client_id, client_secret, sandbox })
	}

	/// Deterministic token-store key derived from the credential pair.
	///
	/// Multiple adapter instances sharing a store converge on the same key, so
	/// a refresh by one instance is visible to all of them.
	pub fn cache_key(&self) -> String {
		let mut hasher = Sha256::new();

		hasher.update(self.client_id.as_bytes());
		hasher.update(self.client_secret.as_bytes());

		let digest = hasher.finalize();
		let mut key = String::with_capacity(CACHE_KEY_PREFIX.len() + 1 + digest.len() * 2);

		key.push_str(CACHE_KEY_PREFIX);
		key.push('-');

		for byte in digest {
			key.push_str(&format!("{byte:02x}"));
		}

		key
	}
}
impl Debug for AdapterConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AdapterConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("sandbox", &self.sandbox)
			.finish()
	}
}

fn require_string(value: &serde_json::Value, field: &'static str) -> Result<String, ConfigError> {
	match value.get(field) {
		None | Some(serde_json::Value::Null) => Err(ConfigError::MissingField { field }),
		Some(serde_json::Value::String(s)) if !s.is_empty() => Ok(s.clone()),
		Some(serde_json::Value::String(_)) => Err(ConfigError::MissingField { field }),
		Some(_) => Err(ConfigError::FieldType { field, expected: "string" }),
	}
}

/// Identity and courier endpoints resolved from the sandbox flag.
#[derive(Clone, Debug)]
pub struct Endpoints {
	/// Identity endpoint receiving the client-credentials exchange.
	pub token_endpoint: Url,
	/// Base URL all courier operation paths are resolved against.
	pub api_base: Url,
}
impl Endpoints {
	/// Resolves the built-in endpoints for the requested environment.
	pub fn for_environment(sandbox: bool) -> Result<Self, ConfigError> {
		let (token, base) = if sandbox {
			(SANDBOX_TOKEN_ENDPOINT, SANDBOX_API_BASE)
		} else {
			(PRODUCTION_TOKEN_ENDPOINT, PRODUCTION_API_BASE)
		};

		Ok(Self { token_endpoint: parse_endpoint(token)?, api_base: parse_endpoint(base)? })
	}

	/// Builds endpoints pointing at caller-provided origins (tests, proxies).
	pub fn custom(token_endpoint: Url, api_base: Url) -> Self {
		Self { token_endpoint, api_base }
	}

	/// Resolves a courier operation path against the API base.
	pub fn api_url(&self, path: &str) -> Result<Url, ConfigError> {
		let joined = format!("{}/{}", self.api_base.as_str().trim_end_matches('/'), path);

		parse_endpoint(&joined)
	}
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { source })
}
