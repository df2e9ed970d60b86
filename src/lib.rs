// src/lib.rs
// DoubanHub - Douban list aggregation with cross-catalog TMDB resolution
//
// Architecture:
// - Domain-centric: list kinds, items and request invariants live in domain
// - Event-driven: every served request leaves a trail on the event bus
// - Explicit: no hidden state between calls, page numbers come from the host
// - Application Layer: host boundary, always answers with items or an error object

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_list_request,
    AccessMode,
    Candidate,
    EndpointSpec,
    InterestStatus,
    ItemImages,
    ItemType,
    ListKind,
    ListRequest,
    MediaKind,
    MediaType,
    Page,
    PageCursor,
    RawItem,
    ResolvedItem,
    WorksSort,
};

// ============================================================================
// PUBLIC API - Error Types & Config
// ============================================================================

pub use config::PipelineConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    register_logging_handlers,
    DomainEvent,
    EventBus,
    EventLogEntry,
    ItemDropped,
    ListAssembled,
    ListFailed,
    ListPageFetched,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{aggregate, normalize_title, sample_uniform, ListService, TitleRules};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::douban::{DoubanClient, RetryPolicy, SourceFetcher};
pub use integrations::http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use integrations::tmdb::{CatalogMatcher, TmdbClient};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ListRequestDto, ListResponse};

// Re-export application submodules
pub use application::commands;
pub use application::dto;
