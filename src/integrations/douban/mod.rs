pub mod client;
pub mod endpoints;
pub mod payload;

pub use client::{DoubanClient, RetryPolicy, SourceFetcher};
pub use endpoints::{endpoint_for, DOULIST_PAGE_SIZE};

#[cfg(test)]
pub use client::MockSourceFetcher;
