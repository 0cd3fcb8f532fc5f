pub mod error;
pub mod flow;
pub mod models;
pub mod navigation;
pub mod pricing;
pub mod store;

pub use error::ErrorClass;
pub use models::*;
pub use pricing::{CartAggregator, CartSummary, DataError, SelectionSet};
pub use store::{KeyValueStore, ProfileError, ProfileStore, StoreError};
