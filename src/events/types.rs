// events/types.rs
//
// Events emitted while a list request is served.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AccessMode;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// SOURCE EVENTS
// ============================================================================

/// Emitted for every source page that came back and parsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPageFetched {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub list: String,
    pub start: u32,
    pub count: u32,
    pub item_count: usize,
}

impl ListPageFetched {
    pub fn new(list: impl Into<String>, start: u32, count: u32, item_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            list: list.into(),
            start,
            count,
            item_count,
        }
    }
}

domain_event!(ListPageFetched);

// ============================================================================
// RESOLUTION EVENTS
// ============================================================================

/// Emitted when a source item found no catalog match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDropped {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub list: String,
    pub source_id: String,
    pub title: String,
    pub canonical_key: String,
}

impl ItemDropped {
    pub fn new(
        list: impl Into<String>,
        source_id: impl Into<String>,
        title: impl Into<String>,
        canonical_key: impl Into<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            list: list.into(),
            source_id: source_id.into(),
            title: title.into(),
            canonical_key: canonical_key.into(),
        }
    }
}

domain_event!(ItemDropped);

// ============================================================================
// OUTCOME EVENTS
// ============================================================================

/// Emitted once per successfully served request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAssembled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub list: String,
    pub mode: AccessMode,
    pub page: u32,
    pub item_count: usize,
    pub dropped: usize,
    pub duplicates: usize,
    pub pages_fetched: usize,
}

impl ListAssembled {
    pub fn new(
        list: impl Into<String>,
        mode: AccessMode,
        page: u32,
        item_count: usize,
        dropped: usize,
        duplicates: usize,
        pages_fetched: usize,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            list: list.into(),
            mode,
            page,
            item_count,
            dropped,
            duplicates,
            pages_fetched,
        }
    }
}

domain_event!(ListAssembled);

/// Emitted when a request fails before a page could be assembled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub list: String,
    pub message: String,
}

impl ListFailed {
    pub fn new(list: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            list: list.into(),
            message: message.into(),
        }
    }
}

domain_event!(ListFailed);
