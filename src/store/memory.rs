//! Thread-safe in-memory [`TokenStore`] for tests and single-process deployments.

// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, TokenStore},
};

#[derive(Clone, Debug)]
struct Entry {
	value: String,
	expires_at: OffsetDateTime,
}

type StoreMap = Arc<RwLock<HashMap<String, Entry>>>;

/// Thread-safe store that keeps cached tokens in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn fetch_now(map: StoreMap, key: String) -> Option<String> {
		let now = OffsetDateTime::now_utc();
		let mut guard = map.write();

		match guard.get(&key) {
			Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
			Some(_) => {
				// Expired entries are pruned lazily on read.
				guard.remove(&key);

				None
			},
			None => None,
		}
	}

	fn put_now(map: StoreMap, key: String, value: String, ttl: Duration) -> Result<(), StoreError> {
		let entry = Entry { value, expires_at: OffsetDateTime::now_utc() + ttl };

		map.write().insert(key, entry);

		Ok(())
	}
}
impl TokenStore for MemoryStore {
	fn fetch<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::fetch_now(map, key)) })
	}

	fn put<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();
		let value = value.to_owned();

		Box::pin(async move { Self::put_now(map, key, value, ttl) })
	}
}
