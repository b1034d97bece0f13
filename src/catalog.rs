//! Jamendo catalog client
//!
//! Pages through the `tracks` endpoint. A failed page is logged and treated
//! as the end of the catalog; nothing is retried.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;

use crate::config::Config;
use crate::error::CatalogError;
use crate::model::track::RawTrack;
use crate::model::{CatalogPage, Track};
use crate::{log_api_request, log_api_result};

#[derive(Debug, Deserialize)]
struct TracksResponse {
    headers: ResponseHeaders,
    #[serde(default)]
    results: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct ResponseHeaders {
    #[serde(default)]
    status: String,
    #[serde(default)]
    code: i64,
    #[serde(default)]
    error_message: String,
}

/// Anything that can hand out catalog pages.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, page: u32) -> BoxFuture<'static, CatalogPage>;
}

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    api_url: String,
    client_id: String,
    page_size: usize,
}

impl CatalogClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            client_id: config.client_id.clone(),
            page_size: config.page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch one 1-based page. Failures degrade to an empty, final page.
    pub async fn fetch_page(&self, page: u32) -> CatalogPage {
        let result = self.try_fetch_page(page).await;
        log_api_result!("fetch_page", result);

        match result {
            Ok(tracks) => {
                let loaded = page_of(page, tracks, self.page_size);
                tracing::info!(
                    page,
                    count = loaded.tracks.len(),
                    has_more = loaded.has_more,
                    "Catalog page loaded"
                );
                loaded
            }
            Err(_) => CatalogPage::exhausted(page),
        }
    }

    pub async fn try_fetch_page(&self, page: u32) -> Result<Vec<Track>, CatalogError> {
        let offset = offset_for(page, self.page_size).to_string();
        let limit = self.page_size.to_string();
        log_api_request!("fetch_page", page, offset = %offset, limit = %limit);

        let response = self
            .http
            .get(format!("{}/tracks/", self.api_url))
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
                ("include", "musicinfo"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;
        parse_tracks(&body)
    }
}

impl PageSource for CatalogClient {
    fn fetch_page(&self, page: u32) -> BoxFuture<'static, CatalogPage> {
        let client = self.clone();
        async move { CatalogClient::fetch_page(&client, page).await }.boxed()
    }
}

/// Offset of the first record on a 1-based page.
pub fn offset_for(page: u32, page_size: usize) -> usize {
    page.saturating_sub(1) as usize * page_size
}

/// Decode a `tracks` response body.
pub fn parse_tracks(body: &str) -> Result<Vec<Track>, CatalogError> {
    let response: TracksResponse = serde_json::from_str(body)?;

    let headers = response.headers;
    if !headers.status.is_empty() && headers.status != "success" {
        return Err(CatalogError::Api {
            code: headers.code,
            message: headers.error_message,
        });
    }

    Ok(response.results.into_iter().map(Track::from).collect())
}

/// Wrap decoded tracks as `page`. `has_more` holds exactly when a full page
/// came back.
pub fn page_of(page: u32, tracks: Vec<Track>, page_size: usize) -> CatalogPage {
    let has_more = tracks.len() == page_size;
    CatalogPage {
        page,
        tracks,
        has_more,
    }
}

/// Decode a response body into the page it answers.
pub fn parse_page(body: &str, page: u32, page_size: usize) -> Result<CatalogPage, CatalogError> {
    Ok(page_of(page, parse_tracks(body)?, page_size))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Serves canned pages and remembers what was asked for. Unknown pages
    /// come back exhausted.
    #[derive(Default)]
    pub struct FakePages {
        pub pages: Mutex<HashMap<u32, CatalogPage>>,
        pub requested: Mutex<Vec<u32>>,
    }

    impl FakePages {
        pub fn with_page(self, page: u32, tracks: Vec<Track>, has_more: bool) -> Self {
            self.pages.lock().unwrap().insert(
                page,
                CatalogPage {
                    page,
                    tracks,
                    has_more,
                },
            );
            self
        }
    }

    impl PageSource for FakePages {
        fn fetch_page(&self, page: u32) -> BoxFuture<'static, CatalogPage> {
            self.requested.lock().unwrap().push(page);
            let result = self
                .pages
                .lock()
                .unwrap()
                .get(&page)
                .cloned()
                .unwrap_or_else(|| CatalogPage::exhausted(page));
            async move { result }.boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(count: usize) -> String {
        let results: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":"{i}","name":"Song {i}","artist_name":"Artist","album_name":"","duration":200,
                       "audio":"https://a/{i}.mp3","image":"","shareurl":"https://s/{i}"}}"#
                )
            })
            .collect();
        format!(
            r#"{{"headers":{{"status":"success","code":0,"error_message":"","results_count":{count}}},
                "results":[{}]}}"#,
            results.join(",")
        )
    }

    #[test]
    fn offsets_are_zero_based() {
        assert_eq!(offset_for(1, 30), 0);
        assert_eq!(offset_for(3, 30), 60);
        assert_eq!(offset_for(0, 30), 0);
    }

    #[test]
    fn full_page_has_more() {
        let page = parse_page(&body(3), 2, 3).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.tracks.len(), 3);
        assert!(page.has_more);
        assert_eq!(page.tracks[1].id, "1");
        assert_eq!(page.tracks[1].album_name, None);
    }

    #[test]
    fn short_page_is_last() {
        let page = parse_page(&body(2), 1, 30).unwrap();
        assert!(!page.has_more);
    }

    #[test]
    fn only_a_full_page_promises_more() {
        let tracks = parse_tracks(&body(3)).unwrap();
        assert!(page_of(4, tracks.clone(), 3).has_more);
        assert!(!page_of(4, tracks.clone(), 4).has_more);
        assert!(!page_of(1, Vec::new(), 3).has_more);
        assert_eq!(page_of(4, tracks, 3).page, 4);
    }

    #[test]
    fn api_failure_is_reported() {
        let body = r#"{"headers":{"status":"failed","code":5,"error_message":"Invalid client_id"},"results":[]}"#;
        match parse_tracks(body) {
            Err(CatalogError::Api { code, message }) => {
                assert_eq!(code, 5);
                assert_eq!(message, "Invalid client_id");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(parse_tracks("<html>"), Err(CatalogError::Json(_))));
    }

    #[tokio::test]
    async fn unreachable_server_degrades_to_empty_page() {
        let config = Config {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let client = CatalogClient::new(reqwest::Client::new(), &config);
        let page = client.fetch_page(4).await;
        assert_eq!(page.page, 4);
        assert!(page.tracks.is_empty());
        assert!(!page.has_more);
    }
}
