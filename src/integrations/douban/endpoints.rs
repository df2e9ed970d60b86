// src/integrations/douban/endpoints.rs
//
// ListKind -> EndpointSpec. All knowledge of the source catalog's URL
// families, referers, and response layouts lives here.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::PipelineConfig;
use crate::domain::{EndpointSpec, ListKind, MediaKind, PayloadShape, ResolutionPolicy};
use crate::error::{AppError, AppResult};

/// Legacy HTML lists always page by this many entries
pub const DOULIST_PAGE_SIZE: u32 = 25;

/// Describe the upstream endpoint serving `kind`
pub fn endpoint_for(kind: &ListKind, config: &PipelineConfig) -> AppResult<EndpointSpec> {
    let source = config.source_base_url.trim_end_matches('/');

    let spec = match kind {
        ListKind::Interests { user_id, status } => EndpointSpec::new(
            "interests",
            format!("{}/user/{}/interests", source, urlencoding::encode(user_id.trim())),
            PayloadShape::Interests,
        )
        .query("status", status.query_value())
        .header("Referer", "https://m.douban.com/mine/movie"),

        ListKind::Suggestions { cookie, media } => {
            let mut spec = EndpointSpec::new(
                "suggestions",
                format!("{}/{}/suggestion", source, media.search_segment()),
                PayloadShape::Items,
            )
            .query("new_struct", "1")
            .query("with_review", "1")
            .header("Referer", "https://m.douban.com/movie")
            .media_hint(*media)
            .policy(ResolutionPolicy::PassThrough);

            if let Some(ck) = extract_ck(cookie) {
                spec = spec.query("ck", ck);
            }
            if !cookie.trim().is_empty() {
                spec = spec.header("Cookie", cookie.trim());
            }
            spec
        }

        ListKind::Collection { url } => collection_endpoint(url, source, config)?,

        ListKind::Recommendations { media, category, region } => {
            let mut spec = EndpointSpec::new(
                "recommendations",
                format!("{}/subject/recent_hot/{}", source, media.search_segment()),
                PayloadShape::Items,
            )
            .count_param("limit")
            .header("Referer", format!("https://m.douban.com/{}", media.search_segment()))
            .media_hint(*media);

            let category = category.trim();
            if !category.is_empty() && category != "all" {
                let region = if region.trim().is_empty() { "全部" } else { region.trim() };
                spec = spec.query("category", category).query("type", region);
            }
            spec
        }

        ListKind::Filmography { celebrity_id, sort_by } => {
            let celebrity_id = urlencoding::encode(celebrity_id.trim());
            EndpointSpec::new(
                "filmography",
                format!("{}/celebrity/{}/works", source, celebrity_id),
                PayloadShape::Items,
            )
            .query("sort_by", sort_by.query_value())
            .header("Referer", format!("https://m.douban.com/celebrity/{}/", celebrity_id))
        }

        ListKind::Carousel => EndpointSpec::new("carousel", config.carousel_url.as_str(), PayloadShape::ItemArray)
            .unpaged()
            .policy(ResolutionPolicy::PassThrough),
    };

    Ok(spec.header("User-Agent", config.user_agent.as_str()))
}

fn collection_endpoint(url: &str, source: &str, config: &PipelineConfig) -> AppResult<EndpointSpec> {
    if let Some(id) = capture(subject_collection_pattern(), url) {
        return Ok(EndpointSpec::new(
            "subject_collection",
            format!("{}/subject_collection/{}/items", source, id),
            PayloadShape::SubjectCollectionItems,
        )
        .header("Referer", format!("https://m.douban.com/subject_collection/{}/", id)));
    }

    if let Some(id) = capture(doulist_pattern(), url) {
        return Ok(EndpointSpec::new(
            "doulist",
            format!("{}/{}/", config.doulist_base_url.trim_end_matches('/'), id),
            PayloadShape::HtmlAnchors,
        )
        .query("sort", "seq")
        .query("playable", "0")
        .query("sub_type", "")
        .fixed_page_size(DOULIST_PAGE_SIZE)
        .policy(ResolutionPolicy::PassThrough)
        .header("Referer", "https://www.douban.com/"));
    }

    Err(AppError::Validation(format!("Unsupported list url: {}", url)))
}

/// The `ck` token carried inside the session cookie
fn extract_ck(cookie: &str) -> Option<String> {
    capture(ck_pattern(), cookie)
}

fn capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn subject_collection_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"douban\.com/subject_collection/([^/?#\s]+)").unwrap())
}

fn doulist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"douban\.com/doulist/(\d+)").unwrap())
}

fn ck_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:^|;\s*)ck=([^;]+)").unwrap())
}
