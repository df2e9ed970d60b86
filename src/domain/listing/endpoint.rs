// src/domain/listing/endpoint.rs
//
// A fully described upstream list endpoint. Built by the source catalog
// integration from a ListKind, consumed by the page fetcher.

use serde::{Deserialize, Serialize};

use crate::domain::media::MediaKind;

/// JSON (or HTML) layout of one upstream page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{ interests: [{ subject: {...} }] }`
    Interests,

    /// `{ items: [{...}] }`
    Items,

    /// `{ subject_collection_items: [{...}] }`
    SubjectCollectionItems,

    /// Legacy HTML page, scanned for subject anchors
    HtmlAnchors,

    /// Bare JSON array of subjects
    ItemArray,
}

/// Whether fetched items are matched against the metadata catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    Resolve,
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Short name for logs
    pub label: String,

    /// URL without the pagination parameters
    pub base_url: String,

    /// Fixed query parameters, in order
    pub query: Vec<(String, String)>,

    /// Name of the page-size parameter (`count` or `limit`)
    pub count_param: String,

    pub headers: Vec<(String, String)>,

    pub shape: PayloadShape,

    /// Applied to items whose own kind is unknown
    pub media_hint: MediaKind,

    pub policy: ResolutionPolicy,

    /// Upstream ignores the requested count and always pages by this size
    pub fixed_page_size: Option<u32>,

    /// False when upstream serves the whole list in one response
    pub paged: bool,
}

impl EndpointSpec {
    pub fn new(label: impl Into<String>, base_url: impl Into<String>, shape: PayloadShape) -> Self {
        Self {
            label: label.into(),
            base_url: base_url.into(),
            query: Vec::new(),
            count_param: "count".to_string(),
            headers: Vec::new(),
            shape,
            media_hint: MediaKind::Unknown,
            policy: ResolutionPolicy::Resolve,
            fixed_page_size: None,
            paged: true,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn count_param(mut self, name: impl Into<String>) -> Self {
        self.count_param = name.into();
        self
    }

    pub fn media_hint(mut self, hint: MediaKind) -> Self {
        self.media_hint = hint;
        self
    }

    pub fn policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fixed_page_size(mut self, size: u32) -> Self {
        self.fixed_page_size = Some(size);
        self
    }

    /// No pagination parameters are sent
    pub fn unpaged(mut self) -> Self {
        self.paged = false;
        self
    }

    /// Page size actually in effect for a requested count
    pub fn effective_count(&self, requested: u32) -> u32 {
        self.fixed_page_size.unwrap_or(requested)
    }

    /// Full URL for one page: `start` first, then the count parameter,
    /// then the fixed query in declaration order
    pub fn page_url(&self, start: u32, count: u32) -> String {
        let mut params = Vec::new();
        if self.paged {
            params.push(format!("start={}", start));
            if self.fixed_page_size.is_none() {
                params.push(format!("{}={}", self.count_param, count));
            }
        }
        params.extend(
            self.query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v))),
        );

        if params.is_empty() {
            return self.base_url.clone();
        }

        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.base_url, separator, params.join("&"))
    }
}
