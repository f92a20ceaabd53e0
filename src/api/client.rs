//! Search Service Client
//!
//! `SearchApi` is the seam between the query pipeline and the network. The pipeline is
//! generic over it so tests can script responses (and their completion order) without a
//! server; `HttpSearchClient` is the production implementation on top of `reqwest`.

use super::error::ApiError;
use super::protocol::{search_url, subjects_url};
use super::types::{Course, SearchResponse, SubjectsResponse};
use crate::config::SearchConfig;
use crate::query::types::QueryParams;

use serde::de::DeserializeOwned;
use std::future::Future;

/// Asynchronous access to the remote search service.
///
/// Futures must be `Send` because each fetch runs on its own spawned task.
pub trait SearchApi: Send + Sync + 'static {
    /// Runs a ranked search. The returned courses keep the service's order.
    fn search(
        &self,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Vec<Course>, ApiError>> + Send;

    /// Lists every subject code known to the service.
    fn subjects(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;
}

/// HTTP client for the search service.
#[derive(Clone)]
pub struct HttpSearchClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `url` and decodes a JSON body, mapping every failure onto `ApiError`.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let resp = self.http_client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned {}", url, status);
            return Err(ApiError::Http(status.as_u16()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice::<T>(&body)?)
    }
}

impl SearchApi for HttpSearchClient {
    async fn search(&self, params: &QueryParams) -> Result<Vec<Course>, ApiError> {
        let url = search_url(&self.base_url, params);
        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.results)
    }

    async fn subjects(&self) -> Result<Vec<String>, ApiError> {
        let response: SubjectsResponse = self.get_json(subjects_url(&self.base_url)).await?;
        Ok(response.subjects)
    }
}
