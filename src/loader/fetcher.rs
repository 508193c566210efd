use crate::config::AppConfig;
use crate::loader::traits::TableSource;
use crate::model::FetchError;

use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Reads `http(s)://` locations over HTTP and everything else from disk.
pub struct SourceFetcher {
    client: Client,
    base_dir: PathBuf,
}

impl SourceFetcher {
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_dir: base_dir.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            config.request_timeout_seconds,
            &config.user_agent,
            config.base_dir.clone(),
        )
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_file(&self, location: &str) -> Result<String, FetchError> {
        let path = self.base_dir.join(location);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[async_trait::async_trait]
impl TableSource for SourceFetcher {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", location);
        if is_remote(location) {
            self.fetch_url(location).await
        } else {
            self.fetch_file(location).await
        }
    }
}
