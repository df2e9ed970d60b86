// src/integrations/tmdb/client.rs
//
// Metadata catalog matcher.
//
// CRITICAL RULES:
// - Empty key => no match, and no request is issued
// - One search per key, narrowed by media kind only when the hint is concrete
// - First result wins. No ranking, no score threshold, no fuzzy distance
// - Any failure is absorbed into "no match"; it never reaches the caller

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::domain::{Candidate, MediaKind, MediaType};
use crate::error::{AppError, AppResult};
use crate::integrations::http::HttpClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogMatcher: Send + Sync {
    /// At most one candidate for a canonical key
    async fn resolve(&self, key: &str, hint: MediaKind) -> Option<Candidate>;
}

/// Search response wrapper
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Movie and tv results spell their title and date fields differently
#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Value,
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f64>,
    media_type: Option<String>,
}

pub struct TmdbClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    token: String,
    language: String,
}

impl TmdbClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            language: "zh-CN".to_string(),
        }
    }

    pub fn from_config(http: Arc<dyn HttpClient>, config: &PipelineConfig) -> Self {
        let mut client = Self::new(http, config.metadata_base_url.as_str(), config.metadata_token.as_str());
        client.language = config.metadata_language.clone();
        client
    }

    /// v4 read tokens are JWTs and go in a header; v3 keys go in the query
    fn is_access_token(&self) -> bool {
        self.token.starts_with("eyJ")
    }

    fn search_url(&self, key: &str, hint: MediaKind) -> String {
        let mut url = format!(
            "{}/search/{}?query={}&language={}",
            self.base_url,
            hint.search_segment(),
            urlencoding::encode(key),
            urlencoding::encode(&self.language)
        );
        if !self.token.is_empty() && !self.is_access_token() {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(&self.token));
        }
        url
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if self.is_access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", self.token)));
        }
        headers
    }

    async fn search(&self, key: &str, hint: MediaKind) -> AppResult<Option<Candidate>> {
        let url = self.search_url(key, hint);
        let response = self.http.get(&url, &self.headers()).await?;

        if !response.is_success() {
            return Err(AppError::Http(format!(
                "Metadata search returned status {}",
                response.status
            )));
        }

        let search: SearchResponse = response.json()?;
        Ok(search
            .results
            .into_iter()
            .next()
            .and_then(|first| Self::map_result(first, hint)))
    }

    /// Map the first search hit. A hit that is neither a movie nor a show
    /// (people, for instance) is no match.
    fn map_result(result: SearchResult, hint: MediaKind) -> Option<Candidate> {
        let media_type = match hint {
            MediaKind::Movie => MediaType::Movie,
            MediaKind::Tv => MediaType::Tv,
            MediaKind::Multi | MediaKind::Unknown => MediaType::parse(result.media_type.as_deref()?)?,
        };

        let candidate_id = match &result.id {
            Value::Number(n) => n.to_string(),
            Value::String(s) if !s.is_empty() => s.clone(),
            _ => return None,
        };

        let title = result.title.or(result.name).filter(|t| !t.trim().is_empty())?;

        Some(Candidate {
            candidate_id,
            title,
            overview: result.overview.unwrap_or_default(),
            release_date: result.release_date.or(result.first_air_date).unwrap_or_default(),
            poster_path: result.poster_path.unwrap_or_default(),
            backdrop_path: result.backdrop_path.unwrap_or_default(),
            rating: result.vote_average.unwrap_or_default(),
            media_type,
        })
    }
}

#[async_trait]
impl CatalogMatcher for TmdbClient {
    async fn resolve(&self, key: &str, hint: MediaKind) -> Option<Candidate> {
        if key.trim().is_empty() {
            return None;
        }

        match self.search(key, hint).await {
            Ok(Some(candidate)) => Some(candidate),
            Ok(None) => {
                log::debug!("No metadata match for '{}' ({})", key, hint);
                None
            }
            Err(e) => {
                log::warn!("Metadata lookup for '{}' failed: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::http::{HttpResponse, MockHttpClient};

    const TV_RESULTS: &str = r#"{
        "page": 1,
        "results": [
            {"id": 1402, "name": "行尸走肉", "overview": "末日", "first_air_date": "2010-10-31",
             "poster_path": "/p.jpg", "backdrop_path": "/b.jpg", "vote_average": 8.1},
            {"id": 9999, "name": "行尸走肉：死城", "first_air_date": "2023-06-18"}
        ]
    }"#;

    fn client(http: MockHttpClient, token: &str) -> TmdbClient {
        TmdbClient::new(Arc::new(http), "https://api.themoviedb.org/3/", token)
    }

    #[tokio::test]
    async fn test_empty_key_issues_no_request() {
        let mut http = MockHttpClient::new();
        http.expect_get().times(0);

        let matcher = client(http, "");
        assert!(matcher.resolve("", MediaKind::Movie).await.is_none());
        assert!(matcher.resolve("   ", MediaKind::Multi).await.is_none());
    }

    #[tokio::test]
    async fn test_first_result_wins() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url, _| {
                url == "https://api.themoviedb.org/3/search/tv?query=%E8%A1%8C%E5%B0%B8%E8%B5%B0%E8%82%89&language=zh-CN"
            })
            .times(1)
            .returning(|_, _| Ok(HttpResponse::ok(TV_RESULTS)));

        let candidate = client(http, "").resolve("行尸走肉", MediaKind::Tv).await.unwrap();
        assert_eq!(candidate.candidate_id, "1402");
        assert_eq!(candidate.title, "行尸走肉");
        assert_eq!(candidate.release_date, "2010-10-31");
        assert_eq!(candidate.media_type, MediaType::Tv);
        assert!((candidate.rating - 8.1).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_hint_searches_multi_and_reads_media_type() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url, _| url.contains("/search/multi?"))
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse::ok(
                    r#"{"results": [{"id": 603, "title": "黑客帝国", "release_date": "1999-03-30", "media_type": "movie"}]}"#,
                ))
            });

        let candidate = client(http, "").resolve("黑客帝国", MediaKind::Unknown).await.unwrap();
        assert_eq!(candidate.media_type, MediaType::Movie);
    }

    #[tokio::test]
    async fn test_person_hit_is_no_match() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .times(1)
            .returning(|_, _| Ok(HttpResponse::ok(r#"{"results": [{"id": 1, "name": "某演员", "media_type": "person"}]}"#)));

        assert!(client(http, "").resolve("某演员", MediaKind::Multi).await.is_none());
    }

    #[tokio::test]
    async fn test_failures_are_absorbed() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .times(1)
            .returning(|_, _| Err(AppError::Http("dns failure".to_string())));
        assert!(client(http, "").resolve("狂飙", MediaKind::Tv).await.is_none());

        let mut http = MockHttpClient::new();
        http.expect_get()
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(401, r#"{"status_message": "Invalid API key"}"#)));
        assert!(client(http, "bad").resolve("狂飙", MediaKind::Tv).await.is_none());

        let mut http = MockHttpClient::new();
        http.expect_get().times(1).returning(|_, _| Ok(HttpResponse::ok("not json")));
        assert!(client(http, "").resolve("狂飙", MediaKind::Tv).await.is_none());
    }

    #[tokio::test]
    async fn test_zero_results_is_no_match() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .times(1)
            .returning(|_, _| Ok(HttpResponse::ok(r#"{"results": []}"#)));
        assert!(client(http, "").resolve("不存在的片子", MediaKind::Movie).await.is_none());
    }

    #[test]
    fn test_credentials_placement() {
        let api_key = client(MockHttpClient::new(), "abc123");
        assert!(api_key.search_url("x", MediaKind::Movie).ends_with("&api_key=abc123"));
        assert!(api_key.headers().iter().all(|(k, _)| k != "Authorization"));

        let token = client(MockHttpClient::new(), "eyJhbGciOi");
        assert!(!token.search_url("x", MediaKind::Movie).contains("api_key"));
        assert!(token
            .headers()
            .contains(&("Authorization".to_string(), "Bearer eyJhbGciOi".to_string())));
    }
}
