// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod aggregation_service;
pub mod list_service;
pub mod sampling;
pub mod title_normalizer;


// Re-export all services and their types
pub use aggregation_service::{
    aggregate,
    aggregate_detailed,
    catalog_resolver,
    pass_through_resolver,
    Aggregated,
};

pub use list_service::ListService;

pub use sampling::{sample_uniform, shuffle_in_place};

pub use title_normalizer::{normalize_title, TitleRule, TitleRules, TitleTransform};
