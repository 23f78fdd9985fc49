pub mod provider;
pub mod store;

pub use provider::{CatalogProvider, JsonFileProvider};
pub use store::{CatalogStore, SimilarityMatrix};
