//! HTTP content source.
//!
//! Fetches `{base_url}/{partition}/medications.json` and
//! `{base_url}/{partition}/scenarios.json`. No authentication.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::instrument;

use medquiz_core::model::{Drug, Partition, ScenarioQuestion};
use medquiz_core::traits::ContentSource;

use crate::document::DocumentKind;
use crate::error::ContentError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Content source backed by a static JSON host.
pub struct HttpContentSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpContentSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let timeout_secs = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_document<T: DeserializeOwned>(
        &self,
        partition: Partition,
        kind: DocumentKind,
    ) -> Result<Vec<T>, ContentError> {
        let url = format!("{}/{}", self.base_url, kind.path(partition));
        tracing::debug!("fetching {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ContentError::Timeout(self.timeout_secs)
            } else {
                ContentError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ContentError::Parse {
            document: url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_drugs(&self, partition: Partition) -> anyhow::Result<Vec<Drug>> {
        Ok(self
            .fetch_document(partition, DocumentKind::Medications)
            .await?)
    }

    async fn fetch_scenarios(&self, partition: Partition) -> anyhow::Result<Vec<ScenarioQuestion>> {
        Ok(self.fetch_document(partition, DocumentKind::Scenarios).await?)
    }
}
