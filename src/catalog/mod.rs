pub mod retriever;
pub mod store;

pub use retriever::retrieve;
pub use store::{CatalogEntry, CatalogError, CatalogStore};
