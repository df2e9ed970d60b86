// src/domain/listing/request.rs
//
// What the host asks for: a list kind plus a 1-based page number.

use serde::{Deserialize, Serialize};

use crate::domain::media::MediaKind;

/// Watch-list status. `RandomMark` samples the whole "mark" list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestStatus {
    Mark,
    Doing,
    Done,
    RandomMark,
}

impl InterestStatus {
    /// Value sent upstream; sampling reads the plain "mark" list
    pub fn query_value(&self) -> &'static str {
        match self {
            InterestStatus::Mark | InterestStatus::RandomMark => "mark",
            InterestStatus::Doing => "doing",
            InterestStatus::Done => "done",
        }
    }

    pub fn is_sampling(&self) -> bool {
        matches!(self, InterestStatus::RandomMark)
    }
}

impl std::str::FromStr for InterestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mark" => Ok(InterestStatus::Mark),
            "doing" => Ok(InterestStatus::Doing),
            "done" => Ok(InterestStatus::Done),
            "random_mark" => Ok(InterestStatus::RandomMark),
            other => Err(format!("unknown interest status '{}'", other)),
        }
    }
}

/// Ordering of a person's works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorksSort {
    Vote,
    Time,
}

impl WorksSort {
    pub fn query_value(&self) -> &'static str {
        match self {
            WorksSort::Vote => "vote",
            WorksSort::Time => "time",
        }
    }
}

/// Every list family the pipeline can serve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListKind {
    /// A user's watch list
    Interests {
        user_id: String,
        status: InterestStatus,
    },

    /// Personalized suggestions; an empty cookie yields the anonymous feed
    Suggestions { cookie: String, media: MediaKind },

    /// Curated collection or legacy doulist, addressed by URL
    Collection { url: String },

    /// Hot movies or shows, optionally filtered by category and region
    Recommendations {
        media: MediaKind,
        category: String,
        region: String,
    },

    /// Works of a person
    Filmography {
        celebrity_id: String,
        sort_by: WorksSort,
    },

    /// Curated home-screen carousel, served whole
    Carousel,
}

impl ListKind {
    /// Short label used in logs and events
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Interests { .. } => "interests",
            ListKind::Suggestions { .. } => "suggestions",
            ListKind::Collection { .. } => "collection",
            ListKind::Recommendations { .. } => "recommendations",
            ListKind::Filmography { .. } => "filmography",
            ListKind::Carousel => "carousel",
        }
    }
}

/// How a list request walks the source catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// One upstream page per requested page
    PlainPage,

    /// Read every upstream page, then draw a uniform sample
    SampleAll,

    /// One unpaged upstream response on page 1, nothing after it
    Snapshot,
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessMode::PlainPage => write!(f, "plain_page"),
            AccessMode::SampleAll => write!(f, "sample_all"),
            AccessMode::Snapshot => write!(f, "snapshot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRequest {
    pub kind: ListKind,

    /// 1-based page number supplied by the host
    pub page: u32,
}

impl ListRequest {
    pub fn new(kind: ListKind, page: u32) -> Self {
        Self { kind, page }
    }

    pub fn access_mode(&self) -> AccessMode {
        match &self.kind {
            ListKind::Interests { status, .. } if status.is_sampling() => AccessMode::SampleAll,
            ListKind::Carousel => AccessMode::Snapshot,
            _ => AccessMode::PlainPage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_mark_samples_mark_list() {
        assert_eq!(InterestStatus::RandomMark.query_value(), "mark");
        assert!(InterestStatus::RandomMark.is_sampling());
        assert!(!InterestStatus::Done.is_sampling());
    }

    #[test]
    fn test_access_mode() {
        let sampling = ListRequest::new(
            ListKind::Interests {
                user_id: "u1".to_string(),
                status: InterestStatus::RandomMark,
            },
            1,
        );
        assert_eq!(sampling.access_mode(), AccessMode::SampleAll);

        let plain = ListRequest::new(
            ListKind::Collection {
                url: "https://m.douban.com/subject_collection/tv_hot".to_string(),
            },
            2,
        );
        assert_eq!(plain.access_mode(), AccessMode::PlainPage);

        let carousel = ListRequest::new(ListKind::Carousel, 1);
        assert_eq!(carousel.access_mode(), AccessMode::Snapshot);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("doing".parse::<InterestStatus>(), Ok(InterestStatus::Doing));
        assert!("wish".parse::<InterestStatus>().is_err());
    }
}
