// src/services/list_service.rs
//
// Orchestrator - the unit a host calls to serve one list page
//
// ACCESS MODES:
// - PlainPage: one upstream page at start = (page - 1) * count, then resolve
// - SampleAll: page 1 reads every upstream page, shuffles, keeps a fixed
//   sample and resolves it; any later page is empty with no network activity
//
// CRITICAL RULES:
// - Request validation happens before any network call
// - A fetch failure is surfaced once, never retried here
// - No state is carried between calls

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::domain::{
    validate_list_request, AccessMode, EndpointSpec, ListRequest, Page, PageCursor, RawItem,
    ResolutionPolicy,
};
use crate::error::AppResult;
use crate::events::{EventBus, ItemDropped, ListAssembled, ListFailed, ListPageFetched};
use crate::integrations::douban::{endpoint_for, DoubanClient, RetryPolicy, SourceFetcher};
use crate::integrations::http::HttpClient;
use crate::integrations::tmdb::{CatalogMatcher, TmdbClient};
use crate::services::aggregation_service::{
    aggregate_detailed, catalog_resolver, pass_through_resolver, Aggregated,
};
use crate::services::sampling::sample_uniform;
use crate::services::title_normalizer::normalize_title;

/// Raw items gathered for one request, before resolution
struct Collected {
    items: Vec<RawItem>,
    cursor: PageCursor,
    pages_fetched: usize,
}

pub struct ListService {
    config: PipelineConfig,
    fetcher: Arc<dyn SourceFetcher>,
    matcher: Arc<dyn CatalogMatcher>,
    event_bus: Arc<EventBus>,
    seed: Option<u64>,
}

impl ListService {
    /// Wires the production source and catalog clients over one transport
    pub fn new(config: PipelineConfig, http: Arc<dyn HttpClient>, event_bus: Arc<EventBus>) -> Self {
        let fetcher = Arc::new(DoubanClient::new(
            Arc::clone(&http),
            RetryPolicy::from_config(&config),
        ));
        let matcher = Arc::new(TmdbClient::from_config(http, &config));

        Self::from_parts(config, fetcher, matcher, event_bus)
    }

    pub fn from_parts(
        config: PipelineConfig,
        fetcher: Arc<dyn SourceFetcher>,
        matcher: Arc<dyn CatalogMatcher>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            fetcher,
            matcher,
            event_bus,
            seed: None,
        }
    }

    /// Fixes the sampling RNG seed, making SampleAll reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Serves one page of a list.
    pub async fn load_page(&self, request: &ListRequest) -> AppResult<Page> {
        let label = request.kind.label();

        match self.assemble(request).await {
            Ok(page) => Ok(page),
            Err(e) => {
                self.event_bus.emit(ListFailed::new(label, e.to_string()));
                Err(e)
            }
        }
    }

    async fn assemble(&self, request: &ListRequest) -> AppResult<Page> {
        validate_list_request(request)?;
        let endpoint = endpoint_for(&request.kind, &self.config)?;
        let mode = request.access_mode();

        let collected = match mode {
            AccessMode::PlainPage => self.collect_plain(&endpoint, request.page).await?,
            AccessMode::SampleAll => {
                let count = endpoint.effective_count(self.config.sample_page_size);
                if request.page > 1 {
                    log::debug!(
                        "[{}] sample page {} requested, returning empty page",
                        endpoint.label,
                        request.page
                    );
                    return Ok(Page::empty(PageCursor::for_page(request.page, count)?));
                }
                self.collect_sample(&endpoint).await?
            }
            AccessMode::Snapshot => {
                if request.page > 1 {
                    let count = endpoint.effective_count(self.config.page_size);
                    return Ok(Page::empty(PageCursor { start: 0, count }));
                }
                self.collect_plain(&endpoint, 1).await?
            }
        };

        let pages_fetched = collected.pages_fetched;
        let cursor = collected.cursor;
        let aggregated = self.resolve(&endpoint, collected.items).await;

        for raw in &aggregated.dropped {
            self.event_bus.emit(ItemDropped::new(
                endpoint.label.as_str(),
                raw.source_id.as_str(),
                raw.title.as_str(),
                normalize_title(&raw.title),
            ));
        }

        self.event_bus.emit(ListAssembled::new(
            endpoint.label.as_str(),
            mode,
            request.page,
            aggregated.items.len(),
            aggregated.dropped.len(),
            aggregated.duplicates,
            pages_fetched,
        ));

        Ok(Page::new(aggregated.items, cursor))
    }

    async fn collect_plain(&self, endpoint: &EndpointSpec, page: u32) -> AppResult<Collected> {
        let count = endpoint.effective_count(self.config.page_size);
        let cursor = PageCursor::for_page(page, count)?;

        let items = self.fetch(endpoint, cursor.start, cursor.count).await?;

        Ok(Collected {
            items,
            cursor,
            pages_fetched: 1,
        })
    }

    /// Reads upstream pages until one comes back short, then samples
    async fn collect_sample(&self, endpoint: &EndpointSpec) -> AppResult<Collected> {
        let count = endpoint.effective_count(self.config.sample_page_size);
        let mut accumulated: Vec<RawItem> = Vec::new();
        let mut start = 0u32;
        let mut pages_fetched = 0usize;

        loop {
            let batch = self.fetch(endpoint, start, count).await?;
            pages_fetched += 1;

            let is_last = batch.len() < count as usize;
            accumulated.extend(batch);

            if is_last {
                break;
            }
            if pages_fetched >= self.config.max_sample_pages as usize {
                log::warn!(
                    "[{}] stopped sampling after {} pages ({} items)",
                    endpoint.label,
                    pages_fetched,
                    accumulated.len()
                );
                break;
            }

            start = match start.checked_add(count) {
                Some(next) => next,
                None => break,
            };
        }

        let total = accumulated.len();
        let sample = sample_uniform(accumulated, self.config.sample_size, &mut self.rng());
        log::debug!(
            "[{}] sampled {} of {} items over {} pages",
            endpoint.label,
            sample.len(),
            total,
            pages_fetched
        );

        Ok(Collected {
            items: sample,
            cursor: PageCursor { start: 0, count },
            pages_fetched,
        })
    }

    async fn fetch(&self, endpoint: &EndpointSpec, start: u32, count: u32) -> AppResult<Vec<RawItem>> {
        let items = self.fetcher.fetch_page(endpoint, start, count).await?;
        self.event_bus.emit(ListPageFetched::new(
            endpoint.label.as_str(),
            start,
            count,
            items.len(),
        ));
        Ok(items)
    }

    async fn resolve(&self, endpoint: &EndpointSpec, items: Vec<RawItem>) -> Aggregated {
        match endpoint.policy {
            ResolutionPolicy::Resolve => {
                aggregate_detailed(items, catalog_resolver(Arc::clone(&self.matcher))).await
            }
            ResolutionPolicy::PassThrough => aggregate_detailed(items, pass_through_resolver()).await,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
