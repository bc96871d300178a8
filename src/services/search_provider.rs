use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("search provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed search response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError>;
}
