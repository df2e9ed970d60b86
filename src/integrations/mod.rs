// src/integrations/mod.rs
//
// External Integrations Module
//
// - http: transport capability injected at construction time
// - douban: source catalog (list pages)
// - tmdb: metadata catalog (search and match)

pub mod douban;
pub mod http;
pub mod tmdb;

pub use douban::{endpoint_for, DoubanClient, RetryPolicy, SourceFetcher};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use tmdb::{CatalogMatcher, TmdbClient};
