// src/services/aggregation_service.rs
//
// Aggregator - concurrent resolution of one page of source items
//
// CRITICAL RULES:
// - Every item is resolved concurrently, with no cap on in-flight lookups
// - Results are read only after every lookup has settled
// - Output order follows input order, never completion order
// - Unresolved items are dropped, never replaced by a placeholder
// - First item with a given title wins; later ones are discarded
// - The dedup set lives for one call only

use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use crate::domain::{RawItem, ResolvedItem};
use crate::integrations::tmdb::CatalogMatcher;
use crate::services::title_normalizer::normalize_title;

/// Outcome of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregated {
    /// Surviving items, in input order, deduplicated
    pub items: Vec<ResolvedItem>,

    /// Source items that did not resolve, in input order
    pub dropped: Vec<RawItem>,

    /// Resolved items discarded because an earlier item had the same title
    pub duplicates: usize,
}

/// Resolves every item, then filters and deduplicates.
pub async fn aggregate_detailed<F, Fut>(raw_items: Vec<RawItem>, resolve: F) -> Aggregated
where
    F: Fn(RawItem) -> Fut,
    Fut: Future<Output = Option<ResolvedItem>>,
{
    // join_all yields results in the order the futures were supplied
    let settled = future::join_all(raw_items.iter().cloned().map(&resolve)).await;

    let mut aggregated = Aggregated::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (raw, outcome) in raw_items.into_iter().zip(settled) {
        match outcome {
            None => aggregated.dropped.push(raw),
            Some(item) => {
                if seen.insert(item.dedup_key().to_string()) {
                    aggregated.items.push(item);
                } else {
                    aggregated.duplicates += 1;
                }
            }
        }
    }

    aggregated
}

/// Same as [`aggregate_detailed`], keeping only the visible items.
pub async fn aggregate<F, Fut>(raw_items: Vec<RawItem>, resolve: F) -> Vec<ResolvedItem>
where
    F: Fn(RawItem) -> Fut,
    Fut: Future<Output = Option<ResolvedItem>>,
{
    aggregate_detailed(raw_items, resolve).await.items
}

/// Resolver that normalizes the title and asks the metadata catalog.
pub fn catalog_resolver(
    matcher: Arc<dyn CatalogMatcher>,
) -> impl Fn(RawItem) -> BoxFuture<'static, Option<ResolvedItem>> {
    move |raw: RawItem| {
        let matcher = Arc::clone(&matcher);
        async move {
            let key = normalize_title(&raw.title);
            matcher
                .resolve(&key, raw.media_kind)
                .await
                .map(ResolvedItem::from_candidate)
        }
        .boxed()
    }
}

/// Resolver for lists that keep the source identity.
pub fn pass_through_resolver() -> impl Fn(RawItem) -> BoxFuture<'static, Option<ResolvedItem>> {
    |raw: RawItem| future::ready(Some(ResolvedItem::from_source(raw))).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, ItemType, MediaKind, MediaType};
    use crate::integrations::tmdb::MockCatalogMatcher;
    use std::time::Duration;

    fn raw(id: &str, title: &str) -> RawItem {
        RawItem::new(id, title, MediaKind::Tv)
    }

    fn candidate(id: &str, title: &str) -> Candidate {
        Candidate {
            candidate_id: id.to_string(),
            title: title.to_string(),
            overview: String::new(),
            release_date: "2010-10-31".to_string(),
            poster_path: "/p.jpg".to_string(),
            backdrop_path: String::new(),
            rating: 8.1,
            media_type: MediaType::Tv,
        }
    }

    fn resolved(id: &str, title: &str) -> ResolvedItem {
        ResolvedItem::from_candidate(candidate(id, title))
    }

    #[tokio::test]
    async fn walking_dead_variants_collapse_to_one_item() {
        let mut matcher = MockCatalogMatcher::new();
        matcher.expect_resolve().returning(|key, _| match key {
            "行尸走肉" => Some(candidate("tt100", "行尸走肉")),
            "布鲁克林警察" => Some(candidate("tt200", "布鲁克林警察")),
            _ => None,
        });

        let items = aggregate(
            vec![
                raw("1", "行尸走肉第十一季"),
                raw("2", "行尸走肉 S11"),
                raw("3", "布鲁克林警察第一季"),
            ],
            catalog_resolver(Arc::new(matcher)),
        )
        .await;

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["tt100", "tt200"]);
        assert!(items.iter().all(|i| i.item_type == ItemType::Resolved));
    }

    #[tokio::test]
    async fn empty_key_is_resolved_as_empty_string() {
        let mut matcher = MockCatalogMatcher::new();
        matcher
            .expect_resolve()
            .withf(|key, _| key.is_empty())
            .times(1)
            .returning(|_, _| None);

        let outcome =
            aggregate_detailed(vec![raw("9", "2012")], catalog_resolver(Arc::new(matcher))).await;

        assert!(outcome.items.is_empty());
        assert_eq!(outcome.dropped.len(), 1);
    }

    #[tokio::test]
    async fn order_follows_input_not_completion() {
        // Earlier items settle last.
        let resolve = |item: RawItem| async move {
            let index: u64 = item.source_id.parse().unwrap();
            tokio::time::sleep(Duration::from_millis(40 - index * 10)).await;
            Some(resolved(&item.source_id, &item.title))
        };

        let items = aggregate(
            vec![raw("0", "a"), raw("1", "b"), raw("2", "c"), raw("3", "d")],
            resolve,
        )
        .await;

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3"]);
    }

    #[tokio::test]
    async fn unresolved_items_are_dropped_without_placeholder() {
        let resolve = |item: RawItem| async move {
            if item.source_id == "2" {
                None
            } else {
                Some(resolved(&item.source_id, &item.title))
            }
        };

        let outcome =
            aggregate_detailed(vec![raw("1", "a"), raw("2", "b"), raw("3", "c")], resolve).await;

        let ids: Vec<&str> = outcome.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(outcome.dropped, vec![raw("2", "b")]);
        assert_eq!(outcome.duplicates, 0);
    }

    #[tokio::test]
    async fn first_title_wins_even_with_different_ids() {
        let resolve = |item: RawItem| async move {
            Some(resolved(&format!("tt{}", item.source_id), "同一部剧"))
        };

        let outcome = aggregate_detailed(vec![raw("1", "x"), raw("2", "y"), raw("3", "z")], resolve)
            .await;

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].id, "tt1");
        assert_eq!(outcome.duplicates, 2);
    }

    #[tokio::test]
    async fn all_lookups_run_concurrently() {
        // 20 lookups of 50ms each finish well under their sequential total.
        let resolve = |item: RawItem| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Some(resolved(&item.source_id, &item.source_id))
        };
        let items: Vec<RawItem> = (0..20).map(|i| raw(&i.to_string(), "t")).collect();

        let started = std::time::Instant::now();
        let out = aggregate(items, resolve).await;

        assert_eq!(out.len(), 20);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn pass_through_keeps_source_identity() {
        let items = aggregate(
            vec![raw("1291546", "霸王别姬"), raw("1292052", "")],
            pass_through_resolver(),
        )
        .await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1291546");
        assert_eq!(items[0].item_type, ItemType::Source);
        // Untitled items dedupe on their id
        assert_eq!(items[1].id, "1292052");
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let out = aggregate_detailed(Vec::new(), pass_through_resolver()).await;
        assert_eq!(out, Aggregated::default());
    }
}
