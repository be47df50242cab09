use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::JikanError;
use super::types::{JikanItemResponse, JikanPageResponse};
use crate::traits::{CatalogDetail, CatalogGateway, CatalogPage};

/// Public Jikan v4 endpoint.
pub const BASE_URL: &str = "https://api.jikan.moe/v4";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("shiori/", env!("CARGO_PKG_VERSION"));

/// Jikan (unofficial MyAnimeList) API v4 client.
pub struct JikanClient {
    base: Url,
    http: Client,
}

impl JikanClient {
    /// Build a client against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, JikanError> {
        let base = Url::parse(base_url).map_err(|e| JikanError::BaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(JikanError::BaseUrl(format!("{base_url} cannot be a base")));
        }
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { base, http })
    }

    /// Client for the public endpoint with default settings.
    pub fn public() -> Result<Self, JikanError> {
        Self::new(BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base can always take path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JikanError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Jikan API error");
            Err(JikanError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, JikanError> {
        tracing::debug!(%url, "Jikan request");
        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))
    }
}

impl CatalogGateway for JikanClient {
    type Error = JikanError;

    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, JikanError> {
        let mut url = self.endpoint(&["top", "anime"]);
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string());

        let resp: JikanPageResponse = self.get_json(url).await?;
        Ok(resp.into_page())
    }

    async fn fetch_item(&self, item_id: u64) -> Result<CatalogDetail, JikanError> {
        let id = item_id.to_string();
        let url = self.endpoint(&["anime", &id, "full"]);

        let resp: JikanItemResponse = self.get_json(url).await?;
        Ok(resp.data.into_detail())
    }
}
