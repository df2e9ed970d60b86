// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::DomainEvent;
pub use types::{ItemDropped, ListAssembled, ListFailed, ListPageFetched};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_logging_handlers;
