//! Persistent key-value storage and the profile store built on it.

pub mod factory;
pub mod memory;
pub mod profile;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use profile::{PROFILE_KEY, ProfileError, ProfileStore};
pub use repository::{KeyValueStore, StoreError};
