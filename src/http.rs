//! Transport primitives for identity and courier API calls.
//!
//! The module exposes [`CourierHttpClient`] as the adapter's only dependency on
//! an HTTP stack. The trait returns raw [`ApiResponse`] values; status
//! classification (2xx/401/other) happens in [`crate::client`], so transports
//! stay oblivious to the retry protocol.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::TransportError};

/// HTTP method subset used by the courier surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Wire name of the method.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Delete => "DELETE",
		}
	}
}

/// One outbound HTTP call, optionally bound to a bearer token.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// `Authorization` header value, when the call is authenticated.
	pub bearer: Option<String>,
	/// JSON request body, when the call carries one.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	/// Builds an unauthenticated `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: Method::Get, url, bearer: None, body: None }
	}

	/// Builds a `POST` request carrying a JSON body.
	pub fn post(url: Url, body: serde_json::Value) -> Self {
		Self { method: Method::Post, url, bearer: None, body: Some(body) }
	}

	/// Builds a bodyless `DELETE` request.
	pub fn delete(url: Url) -> Self {
		Self { method: Method::Delete, url, bearer: None, body: None }
	}

	/// Attaches an `Authorization` header value.
	pub fn with_bearer(mut self, bearer: impl Into<String>) -> Self {
		self.bearer = Some(bearer.into());

		self
	}

	/// Request line (`METHOD url`) used by error reporting.
	pub fn line(&self) -> String {
		format!("{} {}", self.method.as_str(), self.url)
	}
}

/// Raw response handed back by the transport, prior to status classification.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Response body rendered as text, lossily.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the body as JSON, reporting the failing path on mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source, status: self.status })
	}
}

/// Boxed future type returned by [`CourierHttpClient`] implementations.
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports executing identity and courier calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back
/// the token cache, the authorized client, and background proof-image fetches
/// behind a single `Arc`.
pub trait CourierHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes one request, returning the raw response without status
	/// classification. `Err` is reserved for failures with no response at all.
	fn execute<'a>(&'a self, request: ApiRequest) -> HttpFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Every request carries `Content-Type: application/json` and
/// `Cache-Control: no-cache`, matching the courier's API expectations.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl CourierHttpClient for ReqwestHttpClient {
	fn execute<'a>(&'a self, request: ApiRequest) -> HttpFuture<'a> {
		let client = self.0.clone();

		Box::pin(async move {
			let line = request.line();
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client
				.request(method, request.url.clone())
				.header(CONTENT_TYPE, "application/json")
				.header(CACHE_CONTROL, "no-cache");

			if let Some(bearer) = &request.bearer {
				builder = builder.header(AUTHORIZATION, bearer.as_str());
			}
			if let Some(body) = &request.body {
				let payload = serde_json::to_vec(body)
					.map_err(|e| TransportError::network(line.clone(), e))?;

				builder = builder.body(payload);
			}

			let response =
				builder.send().await.map_err(|e| TransportError::network(line.clone(), e))?;
			let status = response.status().as_u16();
			let body =
				response.bytes().await.map_err(|e| TransportError::network(line, e))?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
