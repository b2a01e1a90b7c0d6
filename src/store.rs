//! Storage contracts and built-in backends for the shared bearer-token cache.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

/// Boxed future type returned by [`TokenStore`] implementations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Shared key-value contract backing the bearer-token cache.
///
/// The store may be shared by multiple adapter instances in different
/// processes; entries are overwritten on refresh (never appended) and expire
/// passively through the backend's own TTL mechanism. No locking is layered on
/// top, so a refresh race costs at most one redundant identity call.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the value cached under `key`, if present and unexpired.
	fn fetch<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Stores `value` under `key` for `ttl`, replacing any previous value.
	fn put<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_adapter_error_with_source() {
		let store_error = StoreError::Backend { message: "store unreachable".into() };
		let adapter_error: Error = store_error.clone().into();

		assert!(matches!(adapter_error, Error::Storage(_)));
		assert!(adapter_error.to_string().contains("store unreachable"));

		let source = StdError::source(&adapter_error)
			.expect("Adapter error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
