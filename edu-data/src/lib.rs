pub mod loader;

pub use loader::{Catalog, CatalogError, CatalogIssue, CatalogSources};
