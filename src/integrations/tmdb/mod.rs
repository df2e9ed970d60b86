pub mod client;

pub use client::{CatalogMatcher, TmdbClient};

#[cfg(test)]
pub use client::MockCatalogMatcher;
