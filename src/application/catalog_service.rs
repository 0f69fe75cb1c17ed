// Catalog service - Use cases for browsing the manifest
use crate::application::SharedManifest;
use crate::application::error::PortalError;
use crate::application::resolver::{MatchTier, Resolution, decode_token, resolve};
use crate::domain::manifest::DashboardFile;
use crate::domain::tree::{DashboardSummary, DepartmentNode, TreeStats, build_tree, dashboard_route, tree_stats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct TreeView {
    pub departments: Vec<DepartmentNode>,
    pub stats: TreeStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GallerySort {
    #[default]
    Alpha,
    Files,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryFilter {
    pub section: Option<String>,
    #[serde(rename = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub sort: GallerySort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCard {
    pub id: String,
    pub title: String,
    pub section: String,
    pub department: String,
    pub embed_url: String,
    pub file_count: usize,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EmbedStatus {
    Configured { url: String },
    NotConfigured,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub id: String,
    pub name: String,
    pub department: String,
    pub section: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub description: String,
    pub embed: EmbedStatus,
    pub files: Vec<DashboardFile>,
    pub matched_by: MatchTier,
}

#[derive(Debug, Clone)]
pub enum DashboardLookup {
    Found(DashboardView),
    NotFound {
        query: String,
        suggestions: Vec<DashboardSummary>,
    },
}

#[derive(Clone)]
pub struct CatalogService {
    manifest: SharedManifest,
}

impl CatalogService {
    pub fn new(manifest: SharedManifest) -> Self {
        Self { manifest }
    }

    pub async fn tree(&self) -> TreeView {
        let manifest = self.manifest.read().await;
        let departments = build_tree(&manifest);
        let stats = tree_stats(&departments);
        TreeView { departments, stats }
    }

    /// Cards for one department, optionally narrowed to a section and a
    /// free-text query, then sorted.
    pub async fn department_gallery(
        &self,
        dept_key: &str,
        filter: &GalleryFilter,
    ) -> Result<Vec<GalleryCard>, PortalError> {
        let decoded = decode_token(dept_key);
        let department: &str = &decoded;
        let manifest = self.manifest.read().await;
        let sections = manifest
            .company
            .get(department)
            .ok_or_else(|| PortalError::DepartmentNotFound(department.to_string()))?;

        let mut cards: Vec<GalleryCard> = sections
            .iter()
            .flat_map(|(section, dashboards)| {
                dashboards.iter().map(move |(name, entry)| {
                    let id = entry.route_id(name).to_string();
                    GalleryCard {
                        route: dashboard_route(&id),
                        id,
                        title: name.clone(),
                        section: section.clone(),
                        department: department.to_string(),
                        embed_url: entry.embed_url.clone().unwrap_or_default(),
                        file_count: entry.file_count(),
                    }
                })
            })
            .collect();

        if let Some(section) = filter.section.as_deref().filter(|s| !s.is_empty()) {
            cards.retain(|card| card.section == section);
        }

        let query = filter.query.as_deref().unwrap_or("").trim().to_lowercase();
        if !query.is_empty() {
            cards.retain(|card| {
                card.title.to_lowercase().contains(&query)
                    || card.section.to_lowercase().contains(&query)
            });
        }

        match filter.sort {
            GallerySort::Alpha => cards.sort_by_key(|card| card.title.to_lowercase()),
            GallerySort::Files => cards.sort_by(|a, b| b.file_count.cmp(&a.file_count)),
        }

        Ok(cards)
    }

    /// Resolve a route token into a dashboard view. A miss is data, not an error.
    pub async fn dashboard_view(&self, token: &str) -> DashboardLookup {
        let manifest = self.manifest.read().await;
        match resolve(&manifest, token) {
            Resolution::Found(resolved) => {
                let entry = resolved.entry;
                let embed = match entry.configured_embed() {
                    Some(url) => EmbedStatus::Configured { url: url.to_string() },
                    None => EmbedStatus::NotConfigured,
                };
                DashboardLookup::Found(DashboardView {
                    id: entry.route_id(&resolved.at.name).to_string(),
                    name: resolved.at.name,
                    department: resolved.at.department,
                    section: resolved.at.section,
                    kind: entry.kind,
                    description: entry.description,
                    embed,
                    files: entry.dataset.files,
                    matched_by: resolved.matched_by,
                })
            }
            Resolution::NotFound { query, suggestions } => {
                DashboardLookup::NotFound { query, suggestions }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manifest::fixtures::sample_manifest;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(RwLock::new(sample_manifest())))
    }

    fn titles(cards: &[GalleryCard]) -> Vec<&str> {
        cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_tree_view() {
        let view = service().tree().await;
        assert_eq!(view.departments.len(), 2);
        assert_eq!(view.stats.dashboards, 7);
    }

    #[tokio::test]
    async fn test_gallery_sorted_alpha_by_default() {
        let cards = service()
            .department_gallery("Finance%20%26%20Accounting", &GalleryFilter::default())
            .await
            .unwrap();
        assert_eq!(
            titles(&cards),
            vec![
                "AP Aging Dashboard",
                "AR Aging Dashboard",
                "Budget vs Actual Dashboard",
                "Cash Flow Dashboard"
            ]
        );
        assert_eq!(cards[0].department, "Finance & Accounting");
        assert_eq!(cards[3].id, "Cash Flow Dashboard");
    }

    #[tokio::test]
    async fn test_gallery_section_query_and_files_sort() {
        let svc = service();
        let filter = GalleryFilter {
            section: Some("Payables".to_string()),
            query: None,
            sort: GallerySort::Files,
        };
        let cards = svc.department_gallery("Finance & Accounting", &filter).await.unwrap();
        assert_eq!(titles(&cards), vec!["AP Aging Dashboard", "AR Aging Dashboard"]);
        assert_eq!(cards[0].file_count, 3);

        let filter = GalleryFilter {
            section: None,
            query: Some("  BUDGETING ".to_string()),
            sort: GallerySort::Alpha,
        };
        let cards = svc.department_gallery("Finance & Accounting", &filter).await.unwrap();
        // matches on section name as well as title
        assert_eq!(titles(&cards), vec!["Budget vs Actual Dashboard", "Cash Flow Dashboard"]);
    }

    #[tokio::test]
    async fn test_gallery_empty_section_shows_whole_department() {
        let filter = GalleryFilter {
            section: Some(String::new()),
            query: Some(String::new()),
            sort: GallerySort::Alpha,
        };
        let cards = service()
            .department_gallery("Finance & Accounting", &filter)
            .await
            .unwrap();
        assert_eq!(cards.len(), 4);
    }

    #[tokio::test]
    async fn test_gallery_unknown_department() {
        let err = service()
            .department_gallery("Legal", &GalleryFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::DepartmentNotFound(name) if name == "Legal"));
    }

    #[tokio::test]
    async fn test_dashboard_view_embed_status() {
        let svc = service();
        match svc.dashboard_view("company-kpi").await {
            DashboardLookup::Found(view) => {
                assert_eq!(view.name, "Company KPI Dashboard");
                assert_eq!(view.section, "Strategy");
                assert!(matches!(view.embed, EmbedStatus::Configured { .. }));
                assert_eq!(view.files.len(), 2);
            }
            DashboardLookup::NotFound { .. } => panic!("expected dashboard"),
        }

        // blank embed URL is "not configured", not "not found"
        match svc.dashboard_view("risk-comp").await {
            DashboardLookup::Found(view) => assert_eq!(view.embed, EmbedStatus::NotConfigured),
            DashboardLookup::NotFound { .. } => panic!("expected dashboard"),
        }
    }

    #[tokio::test]
    async fn test_dashboard_view_not_found() {
        match service().dashboard_view("zzz-nonexistent").await {
            DashboardLookup::NotFound { query, suggestions } => {
                assert_eq!(query, "zzz-nonexistent");
                assert!(suggestions.is_empty());
            }
            DashboardLookup::Found(view) => panic!("unexpected {}", view.name),
        }
    }

    #[test]
    fn test_embed_status_serialization() {
        let json = serde_json::to_value(EmbedStatus::NotConfigured).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "notConfigured" }));
        let json = serde_json::to_value(EmbedStatus::Configured { url: "https://x".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "configured", "url": "https://x" }));
    }
}
