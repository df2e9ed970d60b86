// src/events/handlers/logging_handler.rs
//
// Bridges pipeline events onto the `log` facade so a host gets a readable
// trace of every request without subscribing itself.

use crate::events::types::{ItemDropped, ListAssembled, ListFailed, ListPageFetched};
use crate::events::EventBus;

/// Registers the logging subscribers for every pipeline event.
pub fn register_logging_handlers(bus: &EventBus) {
    bus.subscribe::<ListPageFetched, _>(|event| {
        log::debug!(
            "[{}] page start={} count={} -> {} items",
            event.list,
            event.start,
            event.count,
            event.item_count
        );
    });

    bus.subscribe::<ItemDropped, _>(|event| {
        log::debug!(
            "[{}] no catalog match for '{}' (source id {}, key '{}')",
            event.list,
            event.title,
            event.source_id,
            event.canonical_key
        );
    });

    bus.subscribe::<ListAssembled, _>(|event| {
        log::info!(
            "[{}] {} page {}: {} items ({} dropped, {} duplicates, {} upstream pages)",
            event.list,
            event.mode,
            event.page,
            event.item_count,
            event.dropped,
            event.duplicates,
            event.pages_fetched
        );
    });

    bus.subscribe::<ListFailed, _>(|event| {
        log::error!("[{}] request failed: {}", event.list, event.message);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_one_subscriber_per_event() {
        let bus = EventBus::new();
        register_logging_handlers(&bus);

        assert_eq!(bus.subscriber_count::<ListPageFetched>(), 1);
        assert_eq!(bus.subscriber_count::<ItemDropped>(), 1);
        assert_eq!(bus.subscriber_count::<ListAssembled>(), 1);
        assert_eq!(bus.subscriber_count::<ListFailed>(), 1);
    }
}
