use crate::model::FetchError;

/// Where table and catalog text comes from: a URL, a file, or a test double.
#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}
