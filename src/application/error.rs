// Application errors surfaced to the presentation layer
use crate::domain::tree::DashboardSummary;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("department '{0}' is not in the manifest")]
    DepartmentNotFound(String),

    #[error("no dashboard matches '{query}'")]
    DashboardNotFound {
        query: String,
        suggestions: Vec<DashboardSummary>,
    },

    #[error("file '{file_id}' not found on dashboard '{dashboard}'")]
    FileNotFound { dashboard: String, file_id: String },

    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
