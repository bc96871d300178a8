// Search provider double for tests

use std::{collections::HashMap, sync::Mutex, time::Instant};

use async_trait::async_trait;

use super::{build_website_search_query, SearchError, SearchProvider};

#[derive(Default)]
pub struct MockSearchProvider {
    responses: HashMap<String, Result<Vec<String>, SearchError>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_urls(mut self, company_name: &str, urls: &[&str]) -> Self {
        self.responses.insert(
            build_website_search_query(company_name),
            Ok(urls.iter().map(|u| u.to_string()).collect()),
        );
        self
    }

    pub fn with_error(mut self, company_name: &str, error: SearchError) -> Self {
        self.responses
            .insert(build_website_search_query(company_name), Err(error));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), Instant::now()));

        self.responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(vec![]))
    }
}
