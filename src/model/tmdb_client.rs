//! TMDB search API client

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::Settings;
use crate::{log_api_request, log_api_result};
use super::types::{MovieSummary, ResultPage};

/// Failure of a single search request
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchErrorKind {
    Auth,
    Network,
    Upstream,
}

impl SearchError {
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::Auth(_) => SearchErrorKind::Auth,
            SearchError::Network(_) => SearchErrorKind::Network,
            SearchError::Upstream { .. } => SearchErrorKind::Upstream,
        }
    }
}

/// Anything that can answer a movie search for a (query, page) pair
#[async_trait]
pub trait MovieSearch: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, SearchError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<MovieSummary>,
    total_pages: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    status_message: String,
}

/// Client for `GET /search/movie`
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
    language: String,
    include_adult: bool,
}

impl TmdbClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let http = Self::http_builder().build()?;
        Ok(Self::with_http(settings, http))
    }

    /// HTTP client setup shared by every TMDB request
    fn http_builder() -> reqwest::ClientBuilder {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json;charset=utf-8"),
        );

        reqwest::Client::builder()
            .user_agent(concat!("movie-search/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
    }

    fn with_http(settings: &Settings, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: settings.api_base_url.clone(),
            access_token: settings.access_token.clone(),
            language: settings.language.clone(),
            include_adult: settings.include_adult,
        }
    }

    async fn fetch_page(&self, query: &str, page: u32) -> Result<ResultPage, SearchError> {
        let Some(token) = self.access_token.as_deref() else {
            return Err(SearchError::Auth("no access token configured".into()));
        };

        let url = format!("{}/search/movie", self.base_url);
        let page_param = page.to_string();
        let include_adult = if self.include_adult { "true" } else { "false" };

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("query", query),
                ("include_adult", include_adult),
                ("language", self.language.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.status_message)
                .unwrap_or(body);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SearchError::Auth(message),
                _ => SearchError::Upstream { status: status.as_u16(), message },
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| SearchError::Upstream {
            status: status.as_u16(),
            message: format!("malformed response body: {}", e),
        })?;

        Ok(ResultPage {
            items: parsed.results,
            total_pages: parsed.total_pages,
        })
    }
}

#[async_trait]
impl MovieSearch for TmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(ResultPage::empty());
        }

        log_api_request!("/search/movie", query, page);
        let result = self.fetch_page(query, page).await;
        log_api_result!("/search/movie", result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::{HeaderMap, StatusCode as HttpStatus},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::{net::TcpListener, sync::Mutex};

    #[derive(Clone, Debug)]
    struct Captured {
        params: HashMap<String, String>,
        authorization: Option<String>,
    }

    #[derive(Clone)]
    struct ServerState {
        status: HttpStatus,
        body: &'static str,
        captured: Arc<Mutex<Vec<Captured>>>,
    }

    async fn handle_search(
        State(state): State<ServerState>,
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> impl IntoResponse {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        state.captured.lock().await.push(Captured { params, authorization });
        (state.status, state.body)
    }

    async fn spawn_tmdb(
        status: HttpStatus,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState { status, body, captured: captured.clone() };
        let app = Router::new()
            .route("/3/search/movie", get(handle_search))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}/3"), captured)
    }

    fn client_for(base_url: &str, token: Option<&str>) -> TmdbClient {
        let settings = Settings {
            api_base_url: base_url.to_string(),
            access_token: token.map(str::to_string),
            ..Settings::default()
        };
        // Local test servers must never be routed through an ambient proxy
        let http = TmdbClient::http_builder().no_proxy().build().expect("http client");
        TmdbClient::with_http(&settings, http)
    }

    const MATRIX_PAGE: &str = r#"{
        "page": 1,
        "results": [
            {"id": 603, "title": "The Matrix", "overview": "Neo wakes up.",
             "poster_path": "/p.jpg", "backdrop_path": "/b.jpg",
             "release_date": "1999-03-31", "vote_average": 8.2},
            {"id": 604, "title": "The Matrix Reloaded", "overview": "",
             "poster_path": null, "backdrop_path": null,
             "release_date": "2003-05-15", "vote_average": 7.0}
        ],
        "total_pages": 5,
        "total_results": 97
    }"#;

    #[tokio::test]
    async fn search_decodes_results_and_sends_fixed_parameters() {
        let (url, captured) = spawn_tmdb(HttpStatus::OK, MATRIX_PAGE).await;
        let client = client_for(&url, Some("secret"));

        let page = client.search("  Matrix ", 2).await.expect("search");
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "The Matrix");
        assert_eq!(page.items[1].poster_path, None);

        let captured = captured.lock().await;
        assert_eq!(captured.len(), 1);
        let request = &captured[0];
        assert_eq!(request.authorization.as_deref(), Some("Bearer secret"));
        assert_eq!(request.params.get("query").map(String::as_str), Some("Matrix"));
        assert_eq!(request.params.get("page").map(String::as_str), Some("2"));
        assert_eq!(request.params.get("include_adult").map(String::as_str), Some("false"));
        assert_eq!(request.params.get("language").map(String::as_str), Some("en-US"));
    }

    #[tokio::test]
    async fn empty_query_short_circuits_without_request() {
        let (url, captured) = spawn_tmdb(HttpStatus::OK, MATRIX_PAGE).await;
        let client = client_for(&url, Some("secret"));

        let page = client.search("   ", 1).await.expect("search");
        assert_eq!(page, ResultPage::empty());
        assert!(captured.lock().await.is_empty());
    }

    #[tokio::test]
    async fn missing_token_fails_with_auth_without_request() {
        let (url, captured) = spawn_tmdb(HttpStatus::OK, MATRIX_PAGE).await;
        let client = client_for(&url, None);

        let err = client.search("Matrix", 1).await.expect_err("must fail");
        assert_eq!(err.kind(), SearchErrorKind::Auth);
        assert!(captured.lock().await.is_empty());
    }

    #[tokio::test]
    async fn rejected_token_maps_to_auth() {
        let (url, _) = spawn_tmdb(
            HttpStatus::UNAUTHORIZED,
            r#"{"status_code": 7, "status_message": "Invalid API key", "success": false}"#,
        )
        .await;
        let client = client_for(&url, Some("wrong"));

        match client.search("Matrix", 1).await {
            Err(SearchError::Auth(message)) => assert_eq!(message, "Invalid API key"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_maps_to_upstream_with_status_message() {
        let (url, _) = spawn_tmdb(
            HttpStatus::SERVICE_UNAVAILABLE,
            r#"{"status_code": 43, "status_message": "Service offline"}"#,
        )
        .await;
        let client = client_for(&url, Some("secret"));

        match client.search("Matrix", 1).await {
            Err(SearchError::Upstream { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service offline");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_maps_to_upstream() {
        let (url, _) = spawn_tmdb(HttpStatus::OK, "<html>not json</html>").await;
        let client = client_for(&url, Some("secret"));

        let err = client.search("Matrix", 1).await.expect_err("must fail");
        assert_eq!(err.kind(), SearchErrorKind::Upstream);
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = client_for(&format!("http://{addr}/3"), Some("secret"));
        let err = client.search("Matrix", 1).await.expect_err("must fail");
        assert_eq!(err.kind(), SearchErrorKind::Network);
    }

    #[test]
    fn client_takes_request_settings() {
        let settings = Settings {
            access_token: Some("secret".into()),
            language: "de-DE".into(),
            include_adult: true,
            ..Settings::default()
        };
        let client = TmdbClient::new(&settings).expect("client");
        assert_eq!(client.base_url, "https://api.themoviedb.org/3");
        assert_eq!(client.language, "de-DE");
        assert!(client.include_adult);
    }
}
