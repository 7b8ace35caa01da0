//! Desk directory over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};

use deskbook_core::config::DirectoryConfig;
use deskbook_core::error::AppError;
use deskbook_core::result::AppResult;
use deskbook_entity::DeskRecord;
use deskbook_entity::record::parse_directory;

use super::DeskDirectory;

/// Fetches the desk list with `GET {base_url}{desks_path}`.
#[derive(Debug, Clone)]
pub struct HttpDeskDirectory {
    client: Client,
    desks_url: String,
    api_token: Option<String>,
}

impl HttpDeskDirectory {
    /// Create a client from the `[directory]` config section.
    pub fn new(config: &DirectoryConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a directory around an existing client (shared connection pool).
    pub fn with_client(client: Client, config: &DirectoryConfig) -> Self {
        Self {
            client,
            desks_url: config.desks_url(),
            api_token: config.api_token.clone(),
        }
    }

    /// The URL this directory fetches from.
    pub fn desks_url(&self) -> &str {
        &self.desks_url
    }
}

#[async_trait]
impl DeskDirectory for HttpDeskDirectory {
    #[instrument(skip(self), fields(url = %self.desks_url))]
    async fn fetch_desks(&self) -> AppResult<Vec<DeskRecord>> {
        let mut request = self.client.get(&self.desks_url).header(ACCEPT, "application/json");
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Desk API returned {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let records = parse_directory(&body)?;
        debug!(count = records.len(), "Fetched desk directory");
        Ok(records)
    }
}
