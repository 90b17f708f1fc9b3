//! Local directory content source, for offline use and fixtures.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use medquiz_core::model::{Drug, Partition, ScenarioQuestion};
use medquiz_core::traits::ContentSource;

use crate::document::DocumentKind;
use crate::error::ContentError;

/// Serves partition documents from `<root>/<partition>/<document>.json`.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        partition: Partition,
        kind: DocumentKind,
    ) -> Result<Vec<T>, ContentError> {
        let path = self.root.join(kind.path(partition));
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ContentError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| ContentError::Parse {
            document: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn fetch_drugs(&self, partition: Partition) -> anyhow::Result<Vec<Drug>> {
        Ok(self
            .read_document(partition, DocumentKind::Medications)
            .await?)
    }

    async fn fetch_scenarios(&self, partition: Partition) -> anyhow::Result<Vec<ScenarioQuestion>> {
        Ok(self.read_document(partition, DocumentKind::Scenarios).await?)
    }
}
