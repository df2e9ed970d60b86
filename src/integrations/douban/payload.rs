// src/integrations/douban/payload.rs
//
// Maps the source catalog's page layouts into RawItem.
// Entries without an identifier are dropped here, before anything else sees them.

use patterns::subject_anchor;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{MediaKind, PayloadShape, RawItem};
use crate::error::{AppError, AppResult};

/// Interests page wrapper
#[derive(Debug, Deserialize)]
struct InterestsPage {
    #[serde(default)]
    interests: Vec<InterestEntry>,
}

#[derive(Debug, Deserialize)]
struct InterestEntry {
    subject: Option<SubjectData>,
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    #[serde(default)]
    items: Vec<SubjectData>,
}

#[derive(Debug, Deserialize)]
struct CollectionPage {
    #[serde(default)]
    subject_collection_items: Vec<SubjectData>,
}

/// Common subject fields across all JSON layouts
#[derive(Debug, Deserialize)]
struct SubjectData {
    id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    rating: Option<RatingData>,
    #[serde(default)]
    year: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RatingData {
    value: Option<f64>,
}

/// Parse one page body according to its layout
pub fn parse_page(shape: PayloadShape, body: &str, media_hint: MediaKind) -> AppResult<Vec<RawItem>> {
    let subjects = match shape {
        PayloadShape::Interests => {
            let page: InterestsPage = from_json(body)?;
            page.interests.into_iter().filter_map(|entry| entry.subject).collect()
        }
        PayloadShape::Items => from_json::<ItemsPage>(body)?.items,
        PayloadShape::SubjectCollectionItems => from_json::<CollectionPage>(body)?.subject_collection_items,
        PayloadShape::ItemArray => from_json::<Vec<SubjectData>>(body)?,
        PayloadShape::HtmlAnchors => return Ok(scan_anchors(body, media_hint)),
    };

    Ok(subjects
        .into_iter()
        .filter_map(|subject| map_subject(subject, media_hint))
        .collect())
}

fn from_json<T: for<'de> Deserialize<'de>>(body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| AppError::Payload(format!("Unexpected page layout: {}", e)))
}

fn map_subject(subject: SubjectData, media_hint: MediaKind) -> Option<RawItem> {
    let source_id = subject.id.as_ref().and_then(value_to_string)?;
    let media_kind = subject
        .kind
        .as_deref()
        .map(MediaKind::from_source)
        .unwrap_or(MediaKind::Unknown)
        .or(media_hint);

    Some(
        RawItem::new(source_id, subject.title.unwrap_or_default(), media_kind)
            .with_rating(subject.rating.and_then(|r| r.value))
            .with_year(subject.year.as_ref().and_then(value_to_string)),
    )
}

/// Identifiers arrive as strings or numbers; blanks and nulls count as missing
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Scan legacy HTML for subject anchors. One subject usually has several
/// anchors (cover and title); the first wins and a later non-empty text
/// fills in a missing title.
fn scan_anchors(body: &str, media_hint: MediaKind) -> Vec<RawItem> {
    let mut items: Vec<RawItem> = Vec::new();

    for captures in subject_anchor().captures_iter(body) {
        let Some(id) = captures.get(1).map(|m| m.as_str().to_string()) else {
            continue;
        };
        let text = captures
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        match items.iter_mut().find(|item| item.source_id == id) {
            Some(existing) => {
                if existing.title.is_empty() && !text.is_empty() {
                    existing.title = text;
                }
            }
            None => items.push(RawItem::new(id, text, media_hint)),
        }
    }

    items
}

mod patterns {
    use regex::Regex;
    use std::sync::OnceLock;

    /// `<a ... href="https://movie.douban.com/subject/123/" ...>text</a>`
    pub fn subject_anchor() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(r#"<a[^>]*href="https?://movie\.douban\.com/subject/(\d+)/?"[^>]*>\s*([^<]*)"#)
                .expect("subject anchor pattern is valid")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interests_layout() {
        let body = r#"{
            "interests": [
                {"subject": {"id": "35235192", "title": "行尸走肉第十一季", "type": "tv", "rating": {"value": 7.9}, "year": "2021"}},
                {"subject": null},
                {"subject": {"title": "no id"}},
                {"subject": {"id": 1292052, "title": "肖申克的救赎", "type": "movie"}}
            ]
        }"#;

        let items = parse_page(PayloadShape::Interests, body, MediaKind::Unknown).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source_id, "35235192");
        assert_eq!(items[0].media_kind, MediaKind::Tv);
        assert_eq!(items[0].rating, Some(7.9));
        assert_eq!(items[0].year.as_deref(), Some("2021"));
        assert_eq!(items[1].source_id, "1292052");
        assert_eq!(items[1].media_kind, MediaKind::Movie);
    }

    #[test]
    fn test_items_layout_applies_hint() {
        let body = r#"{"items": [{"id": "1", "title": "狂飙"}, {"id": "", "title": "blank"}]}"#;
        let items = parse_page(PayloadShape::Items, body, MediaKind::Tv).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].media_kind, MediaKind::Tv);
    }

    #[test]
    fn test_collection_layout() {
        let body = r#"{"subject_collection_items": [{"id": "2", "title": "流浪地球2", "type": "movie", "cover_url": "x"}]}"#;
        let items = parse_page(PayloadShape::SubjectCollectionItems, body, MediaKind::Unknown).unwrap();
        assert_eq!(items, vec![RawItem::new("2", "流浪地球2", MediaKind::Movie)]);
    }

    #[test]
    fn test_bare_array_layout() {
        let body = r#"[
            {"id": 1291546, "title": "霸王别姬", "type": "movie"},
            {"title": "no id"},
            {"id": "35376457", "title": "漫长的季节", "type": "tv"}
        ]"#;
        let items = parse_page(PayloadShape::ItemArray, body, MediaKind::Unknown).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source_id, "1291546");
        assert_eq!(items[1].media_kind, MediaKind::Tv);

        let err = parse_page(PayloadShape::ItemArray, r#"{"items": []}"#, MediaKind::Unknown).unwrap_err();
        assert!(matches!(err, AppError::Payload(_)));
    }

    #[test]
    fn test_missing_list_is_empty_page() {
        let items = parse_page(PayloadShape::Items, r#"{"count": 0}"#, MediaKind::Movie).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_json_is_payload_error() {
        let err = parse_page(PayloadShape::Interests, "<html></html>", MediaKind::Unknown).unwrap_err();
        assert!(matches!(err, AppError::Payload(_)));
    }

    #[test]
    fn test_html_anchor_scan() {
        let body = r#"
            <div class="doulist-item">
              <div class="post"><a href="https://movie.douban.com/subject/1292052/" target="_blank"><img src="p.jpg"></a></div>
              <div class="title"><a href="https://movie.douban.com/subject/1292052/" target="_blank"> 肖申克的救赎 </a></div>
            </div>
            <div class="doulist-item">
              <div class="title"><a href="https://movie.douban.com/subject/1291546/">霸王别姬</a></div>
            </div>
            <a href="https://book.douban.com/subject/1000/">a book</a>
        "#;

        let items = parse_page(PayloadShape::HtmlAnchors, body, MediaKind::Unknown).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source_id, "1292052");
        assert_eq!(items[0].title, "肖申克的救赎");
        assert_eq!(items[1].source_id, "1291546");
        assert_eq!(items[1].title, "霸王别姬");
    }
}
