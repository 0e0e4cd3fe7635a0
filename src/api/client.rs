use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait CodePalApi: Send + Sync {
    async fn generate(&self, language: Language, prompt: String) -> Result<Envelope>;

    async fn explain(&self, language: Language, code: String) -> Result<Envelope>;

    async fn debug(&self, language: Language, code: String) -> Result<Envelope>;
}

pub struct HttpApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Single best-effort POST: no timeout, no retry.
    pub async fn post_json(&self, endpoint: Endpoint, payload: &CodeRequest) -> Result<Envelope> {
        let url = self.url(endpoint);
        debug!("POST {} for {}", url, payload.language);

        // `json` also sets `Content-Type: application/json`
        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("POST {} returned {}", url, status);
            return Err(Error::RequestFailed);
        }

        let text = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&text)?;

        debug!("POST {} -> ok={}", url, envelope.ok);
        Ok(envelope)
    }
}

#[async_trait]
impl CodePalApi for HttpApiClient {
    async fn generate(&self, language: Language, prompt: String) -> Result<Envelope> {
        self.post_json(Endpoint::Generate, &CodeRequest::generate(language, prompt))
            .await
    }

    async fn explain(&self, language: Language, code: String) -> Result<Envelope> {
        self.post_json(Endpoint::Explain, &CodeRequest::with_code(language, code))
            .await
    }

    async fn debug(&self, language: Language, code: String) -> Result<Envelope> {
        self.post_json(Endpoint::Debug, &CodeRequest::with_code(language, code))
            .await
    }
}
