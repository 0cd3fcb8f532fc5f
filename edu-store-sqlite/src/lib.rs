//! SQLite backend for the edu key-value store.

pub mod factory;
pub mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteKeyValueStore;
