// Repository trait for manifest access
use crate::domain::manifest::Manifest;
use async_trait::async_trait;

#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// Load the manifest the portal starts from
    async fn load(&self) -> anyhow::Result<Manifest>;
}
