// src/domain/listing/entity.rs
//
// Listing value objects.
//
// RawItem is what a source catalog page yields; Candidate is what the
// metadata catalog answers; ResolvedItem is the only shape the host sees.
// None of these are persisted. They live for one pipeline invocation.

use serde::{Deserialize, Serialize};

use crate::domain::media::{MediaKind, MediaType};
use crate::domain::{DomainError, DomainResult};

/// One entry of a source catalog page, before any resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Identifier in the source catalog
    pub source_id: String,

    /// Title exactly as the source catalog spells it
    pub title: String,

    pub media_kind: MediaKind,

    pub rating: Option<f64>,

    pub year: Option<String>,
}

impl RawItem {
    pub fn new(source_id: impl Into<String>, title: impl Into<String>, media_kind: MediaKind) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            media_kind,
            rating: None,
            year: None,
        }
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_year(mut self, year: Option<String>) -> Self {
        self.year = year;
        self
    }
}

/// Best-effort match returned by the metadata catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: String,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub rating: f64,
    pub media_type: MediaType,
}

/// Provenance of a ResolvedItem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Matched against the metadata catalog; `id` is the candidate id
    Resolved,

    /// Passed through unchanged; `id` is the source id
    Source,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImages {
    pub poster: Option<String>,
    pub backdrop: Option<String>,
}

/// The externally visible unit handed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub id: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub title: String,

    pub description: String,

    pub release_date: String,

    pub images: ItemImages,

    pub rating: Option<f64>,

    pub media_type: MediaKind,
}

impl ResolvedItem {
    /// Build the visible item from a metadata catalog match
    pub fn from_candidate(candidate: Candidate) -> Self {
        Self {
            id: candidate.candidate_id,
            item_type: ItemType::Resolved,
            title: candidate.title,
            description: candidate.overview,
            release_date: candidate.release_date,
            images: ItemImages {
                poster: non_empty(candidate.poster_path),
                backdrop: non_empty(candidate.backdrop_path),
            },
            rating: Some(candidate.rating),
            media_type: candidate.media_type.into(),
        }
    }

    /// Build a pass-through item that keeps the source identity
    pub fn from_source(raw: RawItem) -> Self {
        Self {
            id: raw.source_id,
            item_type: ItemType::Source,
            title: raw.title,
            description: String::new(),
            release_date: raw.year.unwrap_or_default(),
            images: ItemImages::default(),
            rating: raw.rating,
            media_type: raw.media_kind,
        }
    }

    /// Key used for page-level deduplication.
    /// Items scraped without a title fall back to their identifier.
    pub fn dedup_key(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Cursor used to fetch a page from the source catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub start: u32,
    pub count: u32,
}

impl PageCursor {
    /// Cursor for a 1-based page number.
    /// Fails when the page lies beyond the addressable `start` range.
    pub fn for_page(page: u32, count: u32) -> DomainResult<Self> {
        let start = page.saturating_sub(1).checked_mul(count).ok_or_else(|| {
            DomainError::InvariantViolation(format!(
                "Page {} is out of range for page size {}",
                page, count
            ))
        })?;
        Ok(Self { start, count })
    }
}

/// Ordered, deduplicated items plus the cursor that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<ResolvedItem>,
    pub cursor: PageCursor,
}

impl Page {
    pub fn new(items: Vec<ResolvedItem>, cursor: PageCursor) -> Self {
        Self { items, cursor }
    }

    /// The deterministic "nothing more here" page
    pub fn empty(cursor: PageCursor) -> Self {
        Self {
            items: Vec::new(),
            cursor,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            candidate_id: "1402".to_string(),
            title: "行尸走肉".to_string(),
            overview: "末日之后".to_string(),
            release_date: "2010-10-31".to_string(),
            poster_path: "/poster.jpg".to_string(),
            backdrop_path: String::new(),
            rating: 8.1,
            media_type: MediaType::Tv,
        }
    }

    #[test]
    fn test_from_candidate() {
        let item = ResolvedItem::from_candidate(candidate());
        assert_eq!(item.id, "1402");
        assert_eq!(item.item_type, ItemType::Resolved);
        assert_eq!(item.description, "末日之后");
        assert_eq!(item.images.poster.as_deref(), Some("/poster.jpg"));
        assert_eq!(item.images.backdrop, None);
        assert_eq!(item.media_type, MediaKind::Tv);
    }

    #[test]
    fn test_from_source_keeps_source_id() {
        let raw = RawItem::new("26794435", "哪吒之魔童降世", MediaKind::Movie)
            .with_rating(Some(8.4))
            .with_year(Some("2019".to_string()));
        let item = ResolvedItem::from_source(raw);
        assert_eq!(item.id, "26794435");
        assert_eq!(item.item_type, ItemType::Source);
        assert_eq!(item.release_date, "2019");
        assert_eq!(item.rating, Some(8.4));
    }

    #[test]
    fn test_serialized_shape() {
        let item = ResolvedItem::from_candidate(candidate());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "resolved");
        assert_eq!(json["releaseDate"], "2010-10-31");
        assert_eq!(json["mediaType"], "tv");
        assert_eq!(json["images"]["poster"], "/poster.jpg");
    }

    #[test]
    fn test_dedup_key_falls_back_to_id() {
        let item = ResolvedItem::from_source(RawItem::new("123", "", MediaKind::Unknown));
        assert_eq!(item.dedup_key(), "123");
    }

    #[test]
    fn test_cursor_for_page() {
        assert_eq!(PageCursor::for_page(1, 20).unwrap(), PageCursor { start: 0, count: 20 });
        assert_eq!(PageCursor::for_page(3, 20).unwrap(), PageCursor { start: 40, count: 20 });
        assert_eq!(PageCursor::for_page(0, 20).unwrap().start, 0);
    }

    #[test]
    fn test_cursor_rejects_unaddressable_page() {
        assert!(PageCursor::for_page(300_000_000, 20).is_err());
        assert!(PageCursor::for_page(u32::MAX, 2).is_err());
        assert_eq!(
            PageCursor::for_page(u32::MAX, 1).unwrap().start,
            u32::MAX - 1
        );
    }
}
