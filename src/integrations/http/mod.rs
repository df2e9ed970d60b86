pub mod client;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient};

#[cfg(test)]
pub use client::MockHttpClient;
