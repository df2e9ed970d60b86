use super::request::{ListKind, ListRequest};
use crate::domain::media::MediaKind;
use crate::domain::{DomainError, DomainResult};

/// Validates a list request before any network activity
pub fn validate_list_request(request: &ListRequest) -> DomainResult<()> {
    if request.page == 0 {
        return Err(DomainError::InvariantViolation(
            "Page numbers start at 1".to_string(),
        ));
    }

    match &request.kind {
        ListKind::Interests { user_id, .. } => require("user id", user_id),
        ListKind::Collection { url } => require("list url", url),
        ListKind::Filmography { celebrity_id, .. } => require("celebrity id", celebrity_id),
        ListKind::Suggestions { media, .. } | ListKind::Recommendations { media, .. } => {
            require_concrete(*media)
        }
        ListKind::Carousel => Ok(()),
    }
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Missing required parameter: {}",
            field
        )));
    }
    Ok(())
}

fn require_concrete(media: MediaKind) -> DomainResult<()> {
    if !media.is_concrete() {
        return Err(DomainError::InvariantViolation(format!(
            "Media must be movie or tv, got {}",
            media
        )));
    }
    Ok(())
}

/// Invariants for list requests:
///
/// 1. Pages are 1-based
/// 2. Interests need a user id
/// 3. Collections need a URL
/// 4. Filmography needs a celebrity id
/// 5. Suggestions and recommendations target exactly one media type
