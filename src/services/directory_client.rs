use std::time::Duration;

use anyhow::Context;
use reqwest::{
    header::{ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT},
    Client,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::configuration::DirectorySettings;

const MAX_PAGES: u8 = 5;
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryCompany {
    pub company_name: String,
    pub employees: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectorySearchResponse {
    #[serde(default)]
    search_result_items: Vec<DirectoryItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryItem {
    company_name: Option<String>,
    antal_anstallda: Option<f64>,
}

pub struct DirectoryClient {
    client: Client,
    base_url: Url,
    page_delay: Duration,
}

impl DirectoryClient {
    pub fn new(settings: &DirectorySettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid directory url: {}", settings.base_url))?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.timeout_secs))
            .read_timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build directory http client")?;

        Ok(DirectoryClient {
            client,
            base_url,
            page_delay: Duration::from_millis(settings.page_delay_ms),
        })
    }

    pub async fn search(
        &self,
        business_type: &str,
        max_pages: u8,
    ) -> anyhow::Result<Vec<DirectoryCompany>> {
        let max_pages = max_pages.clamp(1, MAX_PAGES);
        let mut companies = vec![];

        for page in 1..=max_pages {
            log::info!("Fetching directory page {} for {}", page, business_type);

            let page_companies = self.fetch_page(business_type, page).await?;
            let found = page_companies.len();
            companies.extend(page_companies);

            log::info!(
                "Found {} companies on page {} (total: {})",
                found,
                page,
                companies.len()
            );

            if found == 0 {
                break;
            }
            if page < max_pages {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(companies)
    }

    async fn fetch_page(
        &self,
        business_type: &str,
        page: u8,
    ) -> anyhow::Result<Vec<DirectoryCompany>> {
        let api_url = self.base_url.join("/api/search")?;
        let referer = Url::parse_with_params(
            self.base_url.join("/Search")?.as_str(),
            &[("what", business_type)],
        )?;
        let origin = self.base_url.origin().ascii_serialization();
        let page = page.to_string();

        let response = self
            .client
            .get(api_url)
            .query(&[("what", business_type), ("page", page.as_str())])
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ACCEPT_LANGUAGE, "sv-SE,sv;q=0.9,en-US;q=0.8,en;q=0.7")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, referer.as_str())
            .header(ORIGIN, origin)
            .send()
            .await
            .context("Directory request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Directory API error: HTTP {}", status.as_u16());
        }

        let body = response
            .text()
            .await
            .context("Failed to read directory response")?;

        parse_directory_page(&body)
    }
}

fn parse_directory_page(body: &str) -> anyhow::Result<Vec<DirectoryCompany>> {
    // Bot protection answers with an html page instead of json
    if !body.trim_start().starts_with('{') {
        log::warn!(
            "Unexpected response from directory (not JSON): {}",
            body.chars().take(200).collect::<String>()
        );
        return Ok(vec![]);
    }

    let response: DirectorySearchResponse =
        serde_json::from_str(body).context("Failed to parse directory response")?;

    Ok(response
        .search_result_items
        .into_iter()
        .filter_map(|item| {
            item.company_name.map(|company_name| DirectoryCompany {
                company_name,
                employees: item.antal_anstallda,
            })
        })
        .collect())
}
