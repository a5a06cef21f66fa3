//! Artwork persistence.

mod file;
mod memory;

pub use file::FileArtworkStore;
pub use memory::MemoryArtworkStore;

use crate::artwork::{Artwork, ArtworkDraft};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Artwork not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async store operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Persistence collaborator for artworks.
///
/// Backends assign the id and creation time on save and list newest first.
pub trait ArtworkStore: Send + Sync {
    /// Persist a draft and return the stored artwork.
    fn save(&self, draft: ArtworkDraft) -> BoxFuture<'_, StorageResult<Artwork>>;

    /// All artworks, newest first.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Artwork>>>;

    /// Fetch one artwork.
    fn get(&self, id: &str) -> BoxFuture<'_, StorageResult<Artwork>>;

    /// Delete an artwork. Fails with [`StorageError::NotFound`] if absent.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;
}

/// Minimal executor for driving store futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
