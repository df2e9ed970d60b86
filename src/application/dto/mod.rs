// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are host-friendly, flat and string-typed
// - Conversion TO domain requests is fallible and never touches the network
// - Responses keep the host contract: an item array or an error object

use serde::{Deserialize, Serialize};

use crate::application::error_handling::ErrorResponse;
use crate::domain::{InterestStatus, ListKind, ListRequest, MediaKind, ResolvedItem, WorksSort};
use crate::error::{AppError, AppResult};

// ============================================================================
// REQUEST DTOs
// ============================================================================

/// A list request as a host sends it.
///
/// Only the fields relevant to `list` are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListRequestDto {
    /// interests | suggestions | collection | recommendations | filmography | carousel
    pub list: String,
    pub page: Option<u32>,

    pub user_id: String,
    pub status: String,

    pub cookie: String,
    pub media: String,

    pub url: String,

    pub category: String,
    pub region: String,

    pub celebrity_id: String,
    pub sort_by: String,
}

impl TryFrom<ListRequestDto> for ListRequest {
    type Error = AppError;

    fn try_from(dto: ListRequestDto) -> AppResult<Self> {
        let page = dto.page.unwrap_or(1);

        let kind = match dto.list.trim() {
            "interests" => ListKind::Interests {
                user_id: dto.user_id,
                status: parse_status(&dto.status)?,
            },
            "suggestions" => ListKind::Suggestions {
                cookie: dto.cookie,
                media: parse_media(&dto.media),
            },
            "collection" => ListKind::Collection { url: dto.url },
            "recommendations" => ListKind::Recommendations {
                media: parse_media(&dto.media),
                category: dto.category,
                region: dto.region,
            },
            "filmography" => ListKind::Filmography {
                celebrity_id: dto.celebrity_id,
                sort_by: parse_sort(&dto.sort_by),
            },
            "carousel" => ListKind::Carousel,
            other => {
                return Err(AppError::Validation(format!("Unknown list type '{}'", other)));
            }
        };

        Ok(ListRequest::new(kind, page))
    }
}

fn parse_status(value: &str) -> AppResult<InterestStatus> {
    if value.trim().is_empty() {
        return Ok(InterestStatus::Mark);
    }
    value.trim().parse().map_err(AppError::Validation)
}

fn parse_media(value: &str) -> MediaKind {
    if value.trim().is_empty() {
        MediaKind::Movie
    } else {
        MediaKind::from_source(value)
    }
}

fn parse_sort(value: &str) -> WorksSort {
    match value.trim() {
        "time" => WorksSort::Time,
        _ => WorksSort::Vote,
    }
}

// ============================================================================
// RESPONSE DTOs
// ============================================================================

/// What a host receives for one list request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ListResponse {
    Items(Vec<ResolvedItem>),
    Failure(ErrorResponse),
}

impl ListResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, ListResponse::Failure(_))
    }

    /// Visible items; a failure has none
    pub fn items(&self) -> &[ResolvedItem] {
        match self {
            ListResponse::Items(items) => items,
            ListResponse::Failure(_) => &[],
        }
    }
}

impl From<AppResult<Vec<ResolvedItem>>> for ListResponse {
    fn from(result: AppResult<Vec<ResolvedItem>>) -> Self {
        match result {
            Ok(items) => ListResponse::Items(items),
            Err(e) => ListResponse::Failure(ErrorResponse::from_app_error(e)),
        }
    }
}
