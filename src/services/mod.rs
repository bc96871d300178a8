pub mod directory_client;
pub mod lang_search;
#[cfg(test)]
pub mod mock_search;
pub mod reconciliation;
pub mod search_provider;
pub mod website_checker;

pub use directory_client::*;
pub use lang_search::*;
pub use reconciliation::*;
pub use search_provider::*;
pub use website_checker::*;
