//! Blob storage adapters.
//!
//! - **LocalBlobStorage** - writes images beneath a directory on disk
//! - **InMemoryBlobStorage** - keeps images in memory (testing/development)
//!
//! ```ignore
//! use adapters::storage::{InMemoryBlobStorage, LocalBlobStorage};
//!
//! let storage = LocalBlobStorage::new("./data/media", "http://localhost:8080/media");
//! let storage = InMemoryBlobStorage::new();
//! ```

mod in_memory_blob_storage;
mod local_blob_storage;

pub use in_memory_blob_storage::InMemoryBlobStorage;
pub use local_blob_storage::{LocalBlobStorage, MAX_BLOB_BYTES};
