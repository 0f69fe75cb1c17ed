// JSON file manifest repository implementation
use crate::application::manifest_repository::ManifestRepository;
use crate::domain::manifest::Manifest;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonManifestRepository {
    path: PathBuf,
}

impl JsonManifestRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ManifestRepository for JsonManifestRepository {
    async fn load(&self) -> Result<Manifest> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read manifest {}", self.path.display()))?;
        let manifest = Manifest::from_json(&raw)
            .with_context(|| format!("Failed to parse manifest {}", self.path.display()))?;

        let duplicates = manifest.duplicate_dash_ids();
        if !duplicates.is_empty() {
            tracing::warn!(
                "Manifest {} has duplicate dashIds (first in order wins): {:?}",
                self.path.display(),
                duplicates
            );
        }

        tracing::info!(
            "Loaded manifest {} with {} departments and {} dashboards",
            self.path.display(),
            manifest.company.len(),
            manifest.dashboard_count()
        );
        Ok(manifest)
    }
}
