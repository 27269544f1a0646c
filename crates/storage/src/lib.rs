#![forbid(unsafe_code)]

pub mod local;
pub mod repository;
pub mod sqlite;

pub use local::LocalPersistence;
pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
