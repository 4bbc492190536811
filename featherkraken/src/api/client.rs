//! Search API HTTP client.
//!
//! Two endpoints: airport lookup by free text, and flight search by
//! posting a serialized request. There is no authentication and no retry;
//! timeouts come from [`ApiConfig`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Airport, SearchRequest, SearchResult};

use super::FlightApi;
use super::config::ApiConfig;
use super::error::ApiError;

/// Longest response body excerpt kept on parse errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// Client for the flight search API.
#[derive(Debug, Clone)]
pub struct FlightClient {
    http: reqwest::Client,
    base_url: String,
}

impl FlightClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/airports?query={text}`
    pub async fn get_airports(&self, query: &str) -> Result<Vec<Airport>, ApiError> {
        let url = format!("{}/airports", self.base_url);
        debug!(%url, query, "looking up airports");

        let response = self.http.get(&url).query(&[("query", query)]).send().await?;
        read_json(response).await
    }

    /// `POST {base}/flights` with the request as JSON.
    pub async fn post_flights(&self, request: &SearchRequest) -> Result<SearchResult, ApiError> {
        let url = format!("{}/flights", self.base_url);
        debug!(%url, "searching flights");

        let response = self.http.post(&url).json(request).send().await?;
        let result: SearchResult = read_json(response).await?;

        debug!(
            trips = result.trips.len(),
            source_airports = result.source_airports.len(),
            "search finished"
        );
        Ok(result)
    }
}

impl FlightApi for FlightClient {
    async fn search_airports(&self, query: &str) -> Result<Vec<Airport>, ApiError> {
        self.get_airports(query).await
    }

    async fn search_flights(&self, request: &SearchRequest) -> Result<SearchResult, ApiError> {
        self.post_flights(request).await
    }
}

/// Check the status and decode the body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}
