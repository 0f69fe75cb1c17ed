// Editor service - Edits, export and import of the in-memory working copy
use crate::application::SharedManifest;
use crate::application::error::PortalError;
use crate::application::resolver::{Resolution, resolve};
use crate::domain::manifest::{DashboardFile, DashboardRef, FileKind, Manifest, generated_file_id};
use crate::domain::tree::{TreeStats, build_tree, tree_stats};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFile {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone)]
pub struct EditorService {
    manifest: SharedManifest,
}

impl EditorService {
    pub fn new(manifest: SharedManifest) -> Self {
        Self { manifest }
    }

    /// Pretty-printed JSON of the current working copy.
    pub async fn export(&self) -> Result<String, PortalError> {
        let manifest = self.manifest.read().await;
        manifest.to_pretty_json().map_err(serialization_failure)
    }

    /// Replace the working copy. Malformed input leaves it untouched.
    pub async fn import(&self, raw: &str) -> Result<TreeStats, PortalError> {
        let incoming = Manifest::from_json(raw)?;
        let duplicates = incoming.duplicate_dash_ids();
        if !duplicates.is_empty() {
            tracing::warn!("Imported manifest has duplicate dashIds: {:?}", duplicates);
        }

        let stats = tree_stats(&build_tree(&incoming));
        *self.manifest.write().await = incoming;
        tracing::info!(
            "Imported manifest with {} departments and {} dashboards",
            stats.departments,
            stats.dashboards
        );
        Ok(stats)
    }

    /// Set or clear (empty string) the embed URL of a dashboard.
    pub async fn set_embed_url(&self, token: &str, url: &str) -> Result<DashboardRef, PortalError> {
        let mut manifest = self.manifest.write().await;
        let at = locate(&manifest, token)?;
        if let Some(entry) = manifest.get_mut(&at) {
            let url = url.trim();
            entry.embed_url = if url.is_empty() { None } else { Some(url.to_string()) };
        }
        tracing::info!("Updated embed URL for {} / {} / {}", at.department, at.section, at.name);
        Ok(at)
    }

    pub async fn add_file(&self, token: &str, new_file: NewFile) -> Result<DashboardFile, PortalError> {
        let mut manifest = self.manifest.write().await;
        let at = locate(&manifest, token)?;
        let entry = manifest
            .get_mut(&at)
            .ok_or_else(|| not_found(token))?;

        let id = new_file
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generated_file_id(entry.dataset.files.len()));
        let url = new_file.url.trim().to_string();
        let file = DashboardFile {
            id,
            name: new_file.name.trim().to_string(),
            kind: FileKind::infer(new_file.kind.as_deref().unwrap_or(""), &url),
            url,
            description: new_file.description.trim().to_string(),
        };
        entry.dataset.files.push(file.clone());
        tracing::info!("Added file {} to {}", file.id, at.name);
        Ok(file)
    }

    pub async fn remove_file(&self, token: &str, file_id: &str) -> Result<DashboardFile, PortalError> {
        let mut manifest = self.manifest.write().await;
        let at = locate(&manifest, token)?;
        let entry = manifest
            .get_mut(&at)
            .ok_or_else(|| not_found(token))?;

        let position = entry
            .dataset
            .files
            .iter()
            .position(|f| f.id == file_id)
            .ok_or_else(|| PortalError::FileNotFound {
                dashboard: at.name.clone(),
                file_id: file_id.to_string(),
            })?;
        let removed = entry.dataset.files.remove(position);
        tracing::info!("Removed file {} from {}", removed.id, at.name);
        Ok(removed)
    }
}

fn locate(manifest: &Manifest, token: &str) -> Result<DashboardRef, PortalError> {
    match resolve(manifest, token) {
        Resolution::Found(resolved) => Ok(resolved.at),
        Resolution::NotFound { query, suggestions } => {
            Err(PortalError::DashboardNotFound { query, suggestions })
        }
    }
}

/// Export serialization failures surface as storage errors (500).
fn serialization_failure(e: serde_json::Error) -> PortalError {
    PortalError::Storage(anyhow::Error::new(e).context("Failed to serialize manifest"))
}

fn not_found(token: &str) -> PortalError {
    PortalError::DashboardNotFound {
        query: token.to_string(),
        suggestions: Vec::new(),
    }
}
