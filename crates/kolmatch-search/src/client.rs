//! HTTP client for the Apify TikTok search actor.
//!
//! Wraps `reqwest` with Apify-specific error handling, token management, and
//! typed response deserialization. The actor is invoked synchronously via the
//! `run-sync-get-dataset-items` endpoint, which returns the dataset items of
//! the finished run as a JSON array.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use kolmatch_core::{CandidateSearch, RawSearchItem, ServiceError};

use crate::error::SearchError;

const DEFAULT_BASE_URL: &str = "https://api.apify.com/";

/// Client for a TikTok search actor on the Apify platform.
///
/// Use [`ApifyClient::new`] for production or [`ApifyClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ApifyClient {
    client: Client,
    token: String,
    actor: String,
    region: String,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRunInput<'a> {
    hashtags: &'a [String],
    proxy_country_code: &'a str,
    results_per_page: usize,
    should_download_covers: bool,
    should_download_slideshow_images: bool,
    should_download_subtitles: bool,
    should_download_videos: bool,
}

impl ApifyClient {
    /// Creates a new client pointed at the production Apify API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        actor: &str,
        region: &str,
        timeout_secs: u64,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(token, actor, region, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        token: &str,
        actor: &str,
        region: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("kolmatch/0.1 (kol-matching)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SearchError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            actor: actor.to_owned(),
            region: region.to_owned(),
            base_url,
        })
    }

    /// Runs the search actor for a set of hashtags and returns the raw
    /// dataset items of the finished run.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SearchError::Api`] if the run URL cannot be built.
    /// - [`SearchError::Deserialize`] if the response body is not a JSON
    ///   array of dataset items.
    pub async fn run_search(
        &self,
        hashtags: &[String],
        results_per_page: usize,
    ) -> Result<Vec<RawSearchItem>, SearchError> {
        let url = self.run_sync_url()?;
        let input = SearchRunInput {
            hashtags,
            proxy_country_code: &self.region,
            results_per_page,
            should_download_covers: false,
            should_download_slideshow_images: false,
            should_download_subtitles: false,
            should_download_videos: false,
        };

        let response = self.client.post(url.clone()).json(&input).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: format!("actor run for {} hashtags", hashtags.len()),
            source: e,
        })
    }

    /// Builds the `run-sync-get-dataset-items` URL for the configured actor,
    /// with the token as a percent-encoded query parameter.
    fn run_sync_url(&self) -> Result<Url, SearchError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| SearchError::Api("base URL cannot be a base".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["v2", "acts", &self.actor, "run-sync-get-dataset-items"]);
        }
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }
}

impl CandidateSearch for ApifyClient {
    async fn search_videos(
        &self,
        tags: &[String],
        results_per_page: usize,
    ) -> Result<Vec<RawSearchItem>, ServiceError> {
        self.run_search(tags, results_per_page)
            .await
            .map_err(ServiceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ApifyClient {
        ApifyClient::with_base_url("test-token", "owner~tiktok-scraper", "TH", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn run_sync_url_contains_actor_and_token() {
        let client = test_client("https://api.apify.com");
        let url = client.run_sync_url().expect("should build URL");
        assert_eq!(
            url.as_str(),
            "https://api.apify.com/v2/acts/owner~tiktok-scraper/run-sync-get-dataset-items?token=test-token"
        );
    }

    #[test]
    fn run_sync_url_strips_trailing_slash() {
        let client = test_client("https://api.apify.com/");
        let url = client.run_sync_url().expect("should build URL");
        assert!(!url.path().contains("//"), "double slash in path: {url}");
    }
}
