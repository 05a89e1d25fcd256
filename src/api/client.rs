//! Rooms REST API Client
//!
//! HTTP client for communicating with the rooms server.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::RoomsApi;
use crate::models::{CreateQuestionRequest, Question, Room};

/// Rooms REST API client
pub struct HttpRoomsClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the rooms client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the rooms API (e.g., "http://localhost:3333")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

impl HttpRoomsClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        // Normalize: remove trailing slash
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn questions_url(&self, room_id: &str) -> String {
        format!(
            "{}/rooms/{}/questions",
            self.config.base_url,
            urlencoding::encode(room_id)
        )
    }

    /// Check the status and decode the JSON body
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let text = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RoomsApi for HttpRoomsClient {
    async fn list_rooms(&self) -> ApiResult<Vec<Room>> {
        let url = format!("{}/rooms", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::decode(response).await
    }

    async fn list_questions(&self, room_id: &str) -> ApiResult<Vec<Question>> {
        let response = self
            .client
            .get(self.questions_url(room_id))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::decode(response).await
    }

    async fn create_question(
        &self,
        room_id: &str,
        request: &CreateQuestionRequest,
    ) -> ApiResult<Question> {
        let url = self.questions_url(room_id);
        tracing::debug!(url = %url, "Creating question");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        Self::decode(response).await
    }
}
