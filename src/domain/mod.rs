// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod listing;
pub mod media;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Media kinds
pub use media::{MediaKind, MediaType};

// Listing
pub use listing::{
    validate_list_request, AccessMode, Candidate, EndpointSpec, InterestStatus, ItemImages,
    ItemType, ListKind, ListRequest, Page, PageCursor, PayloadShape, RawItem, ResolutionPolicy,
    ResolvedItem, WorksSort,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of request and value invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl From<DomainError> for crate::error::AppError {
    fn from(err: DomainError) -> Self {
        crate::error::AppError::Validation(err.to_string())
    }
}
