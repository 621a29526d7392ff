use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::welcome_email::AttachmentFetcher,
};

/// Downloads static files (the welcome guide PDF) from the public site.
#[derive(Clone)]
pub struct HttpAssetFetcher {
    client: Client,
}

impl HttpAssetFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AttachmentFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &Url) -> AppResult<Vec<u8>> {
        let bytes = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch PDF file: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Upstream(format!("Failed to fetch PDF file: {e}")))?
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch PDF file: {e}")))?;
        tracing::debug!(url = %url, size = bytes.len(), "Fetched asset");
        Ok(bytes.to_vec())
    }
}
