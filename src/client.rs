//! Authenticated request wrapper implementing the single-retry-on-401 protocol.

// self
use crate::{
	_prelude::*,
	auth::TokenCache,
	config::{AdapterConfig, Endpoints},
	http::{ApiRequest, ApiResponse, CourierHttpClient},
	store::TokenStore,
};

/// Executes courier calls with a cached bearer token attached.
///
/// A 401 on the first attempt is treated as "token expired mid-flight": the
/// cache is bypassed with a forced refresh and the call is repeated exactly
/// once. Every other failure class (courier validation errors, rate limits,
/// network failures) is surfaced untouched. Retry policy for those belongs to
/// the caller, not this adapter.
pub struct AuthorizedClient<C>
where
	C: ?Sized + CourierHttpClient,
{
	http: Arc<C>,
	tokens: TokenCache<C>,
	endpoints: Endpoints,
}
impl<C> AuthorizedClient<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Builds a client over the provided transport and token store.
	pub fn new(
		config: AdapterConfig,
		endpoints: Endpoints,
		store: Arc<dyn TokenStore>,
		http: Arc<C>,
	) -> Self {
		let tokens =
			TokenCache::new(config, endpoints.token_endpoint.clone(), store, http.clone());

		Self { http, tokens, endpoints }
	}

	/// Resolves a courier operation path against the configured API base.
	pub fn endpoint(&self, path: &str) -> Result<Url> {
		Ok(self.endpoints.api_url(path)?)
	}

	/// Sends one authorized request, transparently retrying a single time when
	/// the courier rejects the current token.
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		let bearer = self.tokens.bearer(false).await?;

		match self.attempt(&request, &bearer).await {
			Err(Error::Upstream { status: 401, .. }) => {
				tracing::debug!(
					request = %request.line(),
					"courier rejected the cached token, refreshing and retrying once",
				);

				let bearer = self.tokens.bearer(true).await?;

				self.attempt(&request, &bearer).await
			},
			outcome => outcome,
		}
	}

	async fn attempt(&self, request: &ApiRequest, bearer: &str) -> Result<ApiResponse> {
		let response = self.http.execute(request.clone().with_bearer(bearer)).await?;

		if response.is_success() {
			return Ok(response);
		}

		let body = response.body_text();

		Err(Error::Upstream {
			status: response.status,
			body: if body.is_empty() { None } else { Some(body) },
		})
	}
}
impl<C> Debug for AuthorizedClient<C>
where
	C: ?Sized + CourierHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizedClient").field("endpoints", &self.endpoints).finish()
	}
}
