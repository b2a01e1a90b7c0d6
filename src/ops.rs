//! Adapter operations mapping canonical records onto the courier surface.
//!
//! Every operation is a stateless transform over explicitly injected
//! dependencies: validate the canonical input, build the courier payload, send
//! it through the authorized client, and map the response back.

pub(crate) mod common;

mod cancel;
mod create;
mod driver;
mod quotation;
mod tracking;

// self
use crate::{
	_prelude::*,
	client::AuthorizedClient,
	config::{AdapterConfig, Endpoints},
	http::CourierHttpClient,
	storage::ObjectStore,
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Courier adapter with explicitly injected dependencies.
///
/// The adapter owns the authorized client (token cache + retry protocol), a
/// plain transport handle for unauthenticated fetches (proof images), and the
/// object store proof images land in. Operations live in submodules as `impl`
/// blocks so each file covers one platform operation.
pub struct Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	client: AuthorizedClient<C>,
	http: Arc<C>,
	objects: Arc<dyn ObjectStore>,
}
impl<C> Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Builds an adapter on a caller-provided transport and endpoints.
	pub fn with_http_client(
		config: AdapterConfig,
		endpoints: Endpoints,
		store: Arc<dyn TokenStore>,
		objects: Arc<dyn ObjectStore>,
		http: impl Into<Arc<C>>,
	) -> Self {
		let http = http.into();
		let client = AuthorizedClient::new(config, endpoints, store, http.clone());

		Self { client, http, objects }
	}
}
#[cfg(feature = "reqwest")]
impl Adapter<ReqwestHttpClient> {
	/// Builds an adapter from a validated configuration, provisioning its own
	/// reqwest transport and resolving endpoints from the sandbox flag.
	pub fn new(
		config: AdapterConfig,
		store: Arc<dyn TokenStore>,
		objects: Arc<dyn ObjectStore>,
	) -> Result<Self> {
		let endpoints = Endpoints::for_environment(config.sandbox)?;

		Ok(Self::with_http_client(config, endpoints, store, objects, ReqwestHttpClient::default()))
	}
}
impl<C> Debug for Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Adapter").field("client", &self.client).finish()
	}
}
