//! Object storage seam for proof-of-delivery/pickup images.

pub mod memory;

pub use memory::MemoryObjectStore;

// self
use crate::_prelude::*;

/// Boxed future type returned by [`ObjectStore`] implementations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + 'a + Send>>;

/// Object storage consumed by the tracking callback for proof images.
pub trait ObjectStore
where
	Self: 'static + Send + Sync,
{
	/// Stores `bytes` under `path` with the given content type, replacing any
	/// existing object.
	fn upload<'a>(
		&'a self,
		bytes: Vec<u8>,
		path: &'a str,
		content_type: &'a str,
	) -> StorageFuture<'a, ()>;

	/// Produces a randomized name component for stored objects.
	fn random_name(&self) -> String;
}

/// Error type produced by [`ObjectStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StorageError {
	/// Backend-level failure for the storage engine.
	#[error("Object storage failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Handle to one background proof-image upload.
///
/// The upload task runs to completion whether or not the handle is kept, so
/// dropping it preserves the fire-and-forget contract; [`PodUpload::join`]
/// makes the outcome observable for callers (and tests) that care.
#[derive(Debug)]
pub struct PodUpload {
	path: String,
	handle: tokio::task::JoinHandle<Result<()>>,
}
impl PodUpload {
	/// Spawns the upload future and wraps its handle.
	pub(crate) fn spawn<F>(path: String, fut: F) -> Self
	where
		F: Future<Output = Result<()>> + Send + 'static,
	{
		Self { path, handle: tokio::spawn(fut) }
	}

	/// Storage path the image will be available under.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Waits for the upload to finish, surfacing its failure if any.
	pub async fn join(self) -> Result<()> {
		match self.handle.await {
			Ok(outcome) => outcome,
			Err(e) => Err(StorageError::Backend {
				message: format!("Upload task for {} aborted: {e}", self.path),
			}
			.into()),
		}
	}
}
