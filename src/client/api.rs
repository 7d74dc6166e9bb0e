use serde::Deserialize;
use thiserror::Error;

/// One catalog entry as served by `GET /ebooks`. The timestamp stays a
/// plain string; the client only displays it.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub titulo: String,
    pub arquivo_path: String,
    pub data_upload: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("unreadable catalog payload: {0}")]
    InvalidPayload(String),
}

pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ClientError> {
        let response = self
            .http
            .get(format!("{}/ebooks", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidPayload(e.to_string()))
    }
}
