// src/domain/media/value_objects.rs
//
// Media kind value objects.
//
// MediaKind is the loose hint carried by source catalog entries.
// MediaType is what the metadata catalog commits to once it has matched.

use serde::{Deserialize, Serialize};

/// Kind hint attached to a raw source entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Multi,
    Unknown,
}

impl MediaKind {
    /// Parse the `type` field used by the source catalog.
    /// Anything that is not clearly a movie or a show is `Unknown`.
    pub fn from_source(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "tv" | "show" | "tv_show" => MediaKind::Tv,
            "multi" => MediaKind::Multi,
            _ => MediaKind::Unknown,
        }
    }

    /// Movie and tv narrow a catalog search, multi and unknown do not
    pub fn is_concrete(&self) -> bool {
        matches!(self, MediaKind::Movie | MediaKind::Tv)
    }

    /// Path segment used by the metadata catalog's search endpoints
    pub fn search_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Multi | MediaKind::Unknown => "multi",
        }
    }

    /// Prefer `self` unless it is `Unknown`
    pub fn or(self, fallback: MediaKind) -> MediaKind {
        match self {
            MediaKind::Unknown => fallback,
            known => known,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Tv => write!(f, "tv"),
            MediaKind::Multi => write!(f, "multi"),
            MediaKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Concrete media type of a metadata catalog match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl From<MediaType> for MediaKind {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => MediaKind::Movie,
            MediaType::Tv => MediaKind::Tv,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MediaKind::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source() {
        assert_eq!(MediaKind::from_source("movie"), MediaKind::Movie);
        assert_eq!(MediaKind::from_source("TV"), MediaKind::Tv);
        assert_eq!(MediaKind::from_source("book"), MediaKind::Unknown);
        assert_eq!(MediaKind::from_source(""), MediaKind::Unknown);
    }

    #[test]
    fn test_search_segment() {
        assert_eq!(MediaKind::Movie.search_segment(), "movie");
        assert_eq!(MediaKind::Tv.search_segment(), "tv");
        assert_eq!(MediaKind::Unknown.search_segment(), "multi");
        assert!(!MediaKind::Multi.is_concrete());
    }

    #[test]
    fn test_or_fallback() {
        assert_eq!(MediaKind::Unknown.or(MediaKind::Tv), MediaKind::Tv);
        assert_eq!(MediaKind::Movie.or(MediaKind::Tv), MediaKind::Movie);
    }
}
