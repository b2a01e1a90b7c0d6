//! Cached OAuth client-credentials authentication against the identity endpoint.
//!
//! [`TokenCache::bearer`] is a get-or-refresh lookup over the shared
//! [`TokenStore`]: a cache hit performs no network call, a miss (or an explicit
//! `force_renew`) exchanges the credential at the identity endpoint and
//! overwrites the stored value. No single-flight guard is held; concurrent
//! misses may each refresh, which wastes at most one identity call.

// self
use crate::{
	_prelude::*,
	config::{AdapterConfig, OAUTH_SCOPE},
	http::{ApiRequest, CourierHttpClient},
	store::TokenStore,
};

/// Safety margin subtracted from the issuer's declared `expires_in` so a token
/// is never used right at its expiry instant.
pub const EXPIRY_MARGIN: Duration = Duration::seconds(300);

/// Identity endpoint response shape.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
	/// Token type, typically `Bearer`.
	pub token_type: String,
	/// Issued access token.
	pub access_token: String,
	/// Declared lifetime in seconds.
	pub expires_in: i64,
}
impl TokenGrant {
	/// Renders the `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("{} {}", self.token_type, self.access_token)
	}

	/// Lifetime the grant may be cached for, after the safety margin.
	///
	/// Non-positive results mean "do not cache": the token is still usable for
	/// the current call, but the next call must fetch a fresh one.
	pub fn cache_ttl(&self) -> Duration {
		Duration::seconds(self.expires_in) - EXPIRY_MARGIN
	}
}

/// Get-or-refresh cache for bearer tokens, keyed by credential fingerprint.
pub struct TokenCache<C>
where
	C: ?Sized + CourierHttpClient,
{
	config: AdapterConfig,
	token_endpoint: Url,
	store: Arc<dyn TokenStore>,
	http: Arc<C>,
}
impl<C> TokenCache<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Builds a cache over the provided store and transport.
	pub fn new(
		config: AdapterConfig,
		token_endpoint: Url,
		store: Arc<dyn TokenStore>,
		http: Arc<C>,
	) -> Self {
		Self { config, token_endpoint, store, http }
	}

	/// Returns a bearer header value, refreshing via the identity endpoint on a
	/// cache miss or when `force_renew` is set.
	pub async fn bearer(&self, force_renew: bool) -> Result<String> {
		let key = self.config.cache_key();

		if !force_renew {
			if let Some(cached) = self.store.fetch(&key).await? {
				return Ok(cached);
			}
		}

		let grant = self.exchange().await?;
		let bearer = grant.bearer();
		let ttl = grant.cache_ttl();

		if ttl.is_positive() {
			self.store.put(&key, &bearer, ttl).await?;
		} else {
			tracing::debug!(
				expires_in = grant.expires_in,
				"grant lifetime within the safety margin, returning uncached token",
			);
		}

		Ok(bearer)
	}

	async fn exchange(&self) -> Result<TokenGrant> {
		let payload = serde_json::json!({
			"client_id": self.config.client_id,
			"client_secret": self.config.client_secret,
			"grant_type": "client_credentials",
			"scope": OAUTH_SCOPE,
		});
		let request = ApiRequest::post(self.token_endpoint.clone(), payload);
		let response = self
			.http
			.execute(request)
			.await
			.map_err(|e| Error::Auth { reason: e.to_string() })?;

		if !response.is_success() {
			tracing::error!(status = response.status, "identity endpoint rejected the credential");

			return Err(Error::Auth {
				reason: format!("identity endpoint returned status {}", response.status),
			});
		}

		response.json::<TokenGrant>().map_err(|e| Error::Auth { reason: e.to_string() })
	}
}
impl<C> Debug for TokenCache<C>
where
	C: ?Sized + CourierHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCache")
			.field("config", &self.config)
			.field("token_endpoint", &self.token_endpoint.as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bearer_joins_type_and_token() {
		let grant =
			TokenGrant { token_type: "Bearer".into(), access_token: "abc".into(), expires_in: 900 };

		assert_eq!(grant.bearer(), "Bearer abc");
	}

	#[test]
	fn cache_ttl_subtracts_the_safety_margin() {
		let grant =
			TokenGrant { token_type: "Bearer".into(), access_token: "abc".into(), expires_in: 900 };

		assert_eq!(grant.cache_ttl(), Duration::seconds(600));
	}

	#[test]
	fn short_grants_are_not_cacheable() {
		let exact =
			TokenGrant { token_type: "Bearer".into(), access_token: "abc".into(), expires_in: 300 };
		let short =
			TokenGrant { token_type: "Bearer".into(), access_token: "abc".into(), expires_in: 60 };

		assert!(!exact.cache_ttl().is_positive());
		assert!(!short.cache_ttl().is_positive());
	}
}
