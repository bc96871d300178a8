use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::configuration::SearchSettings;

use super::{SearchError, SearchProvider};

const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

pub struct LangSearchClient {
    client: Client,
    api_key: String,
    url: Url,
    freshness: String,
    summary: bool,
    count: u32,
}

#[derive(Serialize)]
struct WebSearchRequest<'a> {
    query: &'a str,
    freshness: &'a str,
    summary: bool,
    count: u32,
}

// Results come either at the top level or wrapped in `data`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebSearchResponse {
    web_pages: Option<WebPages>,
    data: Option<WebSearchData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebSearchData {
    web_pages: Option<WebPages>,
}

#[derive(Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPageResult>,
}

#[derive(Deserialize)]
struct WebPageResult {
    url: Option<String>,
}

impl LangSearchClient {
    pub fn new(settings: &SearchSettings) -> anyhow::Result<Self> {
        let api_key = settings.api_key.trim();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            anyhow::bail!("LangSearch api key is not configured (APP_SEARCH__API_KEY)");
        }

        let url = Url::parse(&settings.api_url)
            .with_context(|| format!("Invalid search api url: {}", settings.api_url))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build search http client")?;

        Ok(LangSearchClient {
            client,
            api_key: api_key.to_string(),
            url,
            freshness: settings.freshness.clone(),
            summary: settings.summary,
            count: settings.results_count,
        })
    }
}

#[async_trait]
impl SearchProvider for LangSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let body = WebSearchRequest {
            query,
            freshness: &self.freshness,
            summary: self.summary,
            count: self.count,
        };

        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(SearchError::Unavailable(format!(
                "LangSearch API error (HTTP {}): {}",
                status.as_u16(),
                text
            )));
        }

        parse_search_response(&text)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<String>, SearchError> {
    let response: WebSearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Malformed(e.to_string()))?;

    let web_pages = response
        .web_pages
        .or_else(|| response.data.and_then(|data| data.web_pages));

    let urls = match web_pages {
        Some(pages) => pages.value.into_iter().filter_map(|page| page.url).collect(),
        None => {
            log::warn!("Search response has no web pages");
            vec![]
        }
    };

    Ok(urls)
}
