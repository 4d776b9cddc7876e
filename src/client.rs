use async_trait::async_trait;
use dotenv::dotenv;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use std::env;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::confirmation::{BookingPayload, BookingResponse};

// Production endpoint of the lane reservation API.
const DEFAULT_ENDPOINT: &str = "https://731xy9c2ak.execute-api.eu-north-1.amazonaws.com";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("booking request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("booking service unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam towards the lane reservation API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Reserve lanes for a validated booking payload.
    async fn book(&self, payload: &BookingPayload) -> Result<BookingResponse, ClientError>;
}

/// Client for the lane reservation API
pub struct BookingApiClient {
    client: Client,
    endpoint: String,
}

impl BookingApiClient {
    /// Create a client from environment variables, falling back to the
    /// production endpoint.
    pub fn from_env() -> Self {
        dotenv().ok();

        let endpoint =
            env::var("BOOKING_API_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingGateway for BookingApiClient {
    async fn book(&self, payload: &BookingPayload) -> Result<BookingResponse, ClientError> {
        let url = format!("{}/booking", self.endpoint);

        info!("Submitting booking request for {}", payload.when);
        debug!("API URL: {}", url);

        let res = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;
        info!("Response received with status: {}", res.status());

        let response = res.json::<BookingResponse>().await?;
        Ok(response)
    }
}
