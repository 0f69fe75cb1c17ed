// Navigation tree derived from the manifest (sidebar and gallery views)
use super::manifest::{DashboardEntry, Manifest};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentNode {
    pub name: String,
    pub route: String,
    pub sections: Vec<SectionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    pub name: String,
    pub route: String,
    pub dashboards: Vec<DashboardSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub id: String,
    pub name: String,
    pub route: String,
    pub file_count: usize,
    pub has_embed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub departments: usize,
    pub sections: usize,
    pub dashboards: usize,
    pub files: usize,
}

pub fn department_route(department: &str) -> String {
    format!("/departments/{}", urlencoding::encode(department))
}

pub fn section_route(department: &str, section: &str) -> String {
    format!(
        "{}?section={}",
        department_route(department),
        urlencoding::encode(section)
    )
}

pub fn dashboard_route(id_or_name: &str) -> String {
    format!("/dash/{}", urlencoding::encode(id_or_name))
}

impl DashboardSummary {
    pub fn from_entry(name: &str, entry: &DashboardEntry) -> Self {
        let id = entry.route_id(name).to_string();
        Self {
            route: dashboard_route(&id),
            id,
            name: name.to_string(),
            file_count: entry.file_count(),
            has_embed: entry.configured_embed().is_some(),
        }
    }
}

/// Walk the manifest into department -> section -> dashboard summaries,
/// preserving manifest insertion order.
pub fn build_tree(manifest: &Manifest) -> Vec<DepartmentNode> {
    manifest
        .company
        .iter()
        .map(|(dept, sections)| DepartmentNode {
            name: dept.clone(),
            route: department_route(dept),
            sections: sections
                .iter()
                .map(|(section, dashboards)| SectionNode {
                    name: section.clone(),
                    route: section_route(dept, section),
                    dashboards: dashboards
                        .iter()
                        .map(|(name, entry)| DashboardSummary::from_entry(name, entry))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

pub fn tree_stats(tree: &[DepartmentNode]) -> TreeStats {
    let mut stats = TreeStats {
        departments: tree.len(),
        ..TreeStats::default()
    };
    for dept in tree {
        stats.sections += dept.sections.len();
        for section in &dept.sections {
            stats.dashboards += section.dashboards.len();
            stats.files += section.dashboards.iter().map(|d| d.file_count).sum::<usize>();
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manifest::fixtures::sample_manifest;

    #[test]
    fn test_counts_match_manifest() {
        let manifest = sample_manifest();
        let tree = build_tree(&manifest);
        let stats = tree_stats(&tree);

        assert_eq!(tree.len(), manifest.company.len());
        assert_eq!(stats.departments, 2);
        assert_eq!(stats.sections, 4);
        assert_eq!(stats.dashboards, manifest.dashboard_count());
        assert_eq!(stats.files, 2 + 1 + 3 + 1 + 2);
    }

    #[test]
    fn test_order_and_routes() {
        let tree = build_tree(&sample_manifest());
        assert_eq!(tree[0].name, "Executive / Management");
        assert_eq!(tree[0].route, "/departments/Executive%20%2F%20Management");
        assert_eq!(tree[1].sections[1].name, "Budgeting & Reporting");
        assert_eq!(
            tree[1].sections[1].route,
            "/departments/Finance%20%26%20Accounting?section=Budgeting%20%26%20Reporting"
        );

        let kpi = &tree[0].sections[0].dashboards[0];
        assert_eq!(kpi.id, "company-kpi");
        assert_eq!(kpi.route, "/dash/company-kpi");
        assert_eq!(kpi.file_count, 2);
        assert!(kpi.has_embed);
    }

    #[test]
    fn test_missing_dash_id_falls_back_to_name() {
        let tree = build_tree(&sample_manifest());
        let cash = &tree[1].sections[1].dashboards[1];
        assert_eq!(cash.id, "Cash Flow Dashboard");
        assert_eq!(cash.route, "/dash/Cash%20Flow%20Dashboard");
        assert!(!cash.has_embed);
    }

    #[test]
    fn test_empty_manifest() {
        let tree = build_tree(&Manifest::default());
        assert!(tree.is_empty());
        assert_eq!(tree_stats(&tree), TreeStats::default());
    }
}
