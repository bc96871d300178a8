use std::sync::Arc;

use crate::domain::{company::CompanyRecord, domain_match::find_match, outcome::MatchOutcome};

use super::SearchProvider;

const SHOWN_CANDIDATES: usize = 3;

pub fn build_website_search_query(company_name: &str) -> String {
    format!("{} company website", company_name)
}

pub struct WebsiteChecker {
    provider: Arc<dyn SearchProvider>,
}

impl WebsiteChecker {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        WebsiteChecker { provider }
    }

    pub async fn check_company(&self, company: &CompanyRecord) -> MatchOutcome {
        let query = build_website_search_query(&company.name);

        let candidate_urls = match self.provider.search(&query).await {
            Ok(urls) => urls,
            Err(e) => {
                log::error!("Checking {} failed: {}", company.name, e);
                return MatchOutcome::failed(company.clone(), e.to_string());
            }
        };

        match find_match(&company.name, &candidate_urls).map(str::to_string) {
            Some(url) => {
                log::info!("Checking {}: has website {}", company.name, url);
                MatchOutcome::matched(company.clone(), url, candidate_urls)
            }
            None => {
                match candidate_urls.is_empty() {
                    true => log::info!(
                        "Checking {}: no website found, search returned no urls",
                        company.name
                    ),
                    false => log::info!(
                        "Checking {}: no website found among {} urls, first: {:?}",
                        company.name,
                        candidate_urls.len(),
                        &candidate_urls[..candidate_urls.len().min(SHOWN_CANDIDATES)]
                    ),
                }
                MatchOutcome::no_match(company.clone(), candidate_urls)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{build_website_search_query, WebsiteChecker};
    use crate::{
        domain::company::CompanyRecord,
        services::{mock_search::MockSearchProvider, SearchError},
    };

    #[test]
    fn query_is_deterministic() {
        assert_eq!(
            build_website_search_query("K Frisör AB"),
            "K Frisör AB company website"
        );
        assert_eq!(
            build_website_search_query("K Frisör AB"),
            build_website_search_query("K Frisör AB")
        );
    }

    #[tokio::test]
    async fn check_company_with_matching_url() {
        let provider = MockSearchProvider::new().with_urls("K Frisör AB", &["https://www.kfrisor.se"]);
        let checker = WebsiteChecker::new(Arc::new(provider));

        let outcome = checker.check_company(&CompanyRecord::new("K Frisör AB")).await;

        assert_eq!(outcome.matched_url(), Some("https://www.kfrisor.se"));
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.candidate_urls, vec!["https://www.kfrisor.se"]);
    }

    #[tokio::test]
    async fn check_company_without_matching_url_keeps_candidates() {
        let provider = MockSearchProvider::new().with_urls("K Frisör AB", &["https://www.google.com"]);
        let checker = WebsiteChecker::new(Arc::new(provider));

        let outcome = checker.check_company(&CompanyRecord::new("K Frisör AB")).await;

        assert!(outcome.is_no_match());
        assert_eq!(outcome.matched_url(), None);
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.candidate_urls, vec!["https://www.google.com"]);
    }

    #[tokio::test]
    async fn check_company_records_provider_failure() {
        let provider = MockSearchProvider::new().with_error(
            "K Frisör AB",
            SearchError::Unavailable("HTTP 503".to_string()),
        );
        let checker = WebsiteChecker::new(Arc::new(provider));

        let outcome = checker.check_company(&CompanyRecord::new("K Frisör AB")).await;

        assert_eq!(outcome.matched_url(), None);
        assert_eq!(outcome.error(), Some("search provider unavailable: HTTP 503"));
        assert!(outcome.candidate_urls.is_empty());
    }

    #[tokio::test]
    async fn check_company_records_malformed_response() {
        let provider = MockSearchProvider::new().with_error(
            "RS Frisör AB",
            SearchError::Malformed("expected value at line 1".to_string()),
        );
        let checker = WebsiteChecker::new(Arc::new(provider));

        let outcome = checker.check_company(&CompanyRecord::new("RS Frisör AB")).await;

        assert!(outcome.error().is_some());
        assert_eq!(outcome.matched_url(), None);
    }

    #[tokio::test]
    async fn check_company_sends_built_query() {
        let provider = Arc::new(MockSearchProvider::new());
        let checker = WebsiteChecker::new(provider.clone());

        checker.check_company(&CompanyRecord::new("Linlugg frisör AB")).await;

        assert_eq!(provider.queries(), vec!["Linlugg frisör AB company website"]);
    }
}
