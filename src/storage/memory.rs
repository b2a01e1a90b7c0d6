//! In-process [`ObjectStore`] that records uploads for tests and demos.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	storage::{ObjectStore, StorageFuture},
};

const RANDOM_NAME_LEN: usize = 8;

/// One recorded upload.
#[derive(Clone, Debug)]
pub struct StoredObject {
	/// Storage path the object was uploaded under.
	pub path: String,
	/// Declared content type.
	pub content_type: String,
	/// Raw object bytes.
	pub bytes: Vec<u8>,
}

/// Thread-safe object store keeping uploads in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryObjectStore(Arc<RwLock<Vec<StoredObject>>>);
impl MemoryObjectStore {
	/// Snapshot of every recorded upload, in arrival order.
	pub fn objects(&self) -> Vec<StoredObject> {
		self.0.read().clone()
	}
}
impl ObjectStore for MemoryObjectStore {
	fn upload<'a>(
		&'a self,
		bytes: Vec<u8>,
		path: &'a str,
		content_type: &'a str,
	) -> StorageFuture<'a, ()> {
		let objects = self.0.clone();

		Box::pin(async move {
			objects.write().push(StoredObject {
				path: path.to_owned(),
				content_type: content_type.to_owned(),
				bytes,
			});

			Ok(())
		})
	}

	fn random_name(&self) -> String {
		rand::rng().sample_iter(Alphanumeric).take(RANDOM_NAME_LEN).map(char::from).collect()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	#[test]
	fn uploads_are_recorded_in_order() {
		let store = MemoryObjectStore::default();
		let rt = Runtime::new().expect("Failed to build Tokio runtime for object store test.");

		rt.block_on(store.upload(vec![1], "pod_img/a.jpeg", "image/jpeg"))
			.expect("First upload should succeed.");
		rt.block_on(store.upload(vec![2], "pod_img/b.jpeg", "image/jpeg"))
			.expect("Second upload should succeed.");

		let objects = store.objects();

		assert_eq!(objects.len(), 2);
		assert_eq!(objects[0].path, "pod_img/a.jpeg");
		assert_eq!(objects[1].bytes, vec![2]);
	}

	#[test]
	fn random_names_vary_between_calls() {
		let store = MemoryObjectStore::default();
		let a = store.random_name();
		let b = store.random_name();

		assert_eq!(a.len(), 8);
		// Collisions are possible but vanishingly unlikely for this length.
		assert_ne!(a, b);
	}
}
