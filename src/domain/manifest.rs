// Manifest domain model: company -> department -> section -> dashboard
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type Department = IndexMap<String, Section>;
pub type Section = IndexMap<String, DashboardEntry>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub company: IndexMap<String, Department>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    #[serde(default)]
    pub dash_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dataset: Dataset,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub files: Vec<DashboardFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Local,
    External,
}

impl FileKind {
    /// Explicit `local`/`external` wins; otherwise site-relative URLs are local.
    pub fn infer(declared: &str, url: &str) -> Self {
        match declared.trim().to_lowercase().as_str() {
            "local" => FileKind::Local,
            "external" => FileKind::External,
            _ if url.starts_with('/') => FileKind::Local,
            _ => FileKind::External,
        }
    }
}

/// Id for a file created without one: `file-<unix millis>-<index>`.
pub fn generated_file_id(index: usize) -> String {
    format!("file-{}-{}", chrono::Utc::now().timestamp_millis(), index)
}

/// Addresses one dashboard node by its position in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRef {
    pub department: String,
    pub section: String,
    pub name: String,
}

impl DashboardEntry {
    /// Identifier used in routes: the dashId, or the display name when it is empty.
    pub fn route_id<'a>(&'a self, name: &'a str) -> &'a str {
        if self.dash_id.is_empty() { name } else { &self.dash_id }
    }

    pub fn file_count(&self) -> usize {
        self.dataset.files.len()
    }

    /// Embed URL if one is configured and not blank.
    pub fn configured_embed(&self) -> Option<&str> {
        self.embed_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Manifest {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Pretty-printed serialization with two-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Every dashboard in department -> section -> dashboard insertion order.
    pub fn dashboards(&self) -> impl Iterator<Item = (DashboardRef, &DashboardEntry)> {
        self.company.iter().flat_map(|(dept, sections)| {
            sections.iter().flat_map(move |(section, dashboards)| {
                dashboards.iter().map(move |(name, entry)| {
                    (
                        DashboardRef {
                            department: dept.clone(),
                            section: section.clone(),
                            name: name.clone(),
                        },
                        entry,
                    )
                })
            })
        })
    }

    pub fn dashboard_count(&self) -> usize {
        self.company
            .values()
            .flat_map(|sections| sections.values())
            .map(|dashboards| dashboards.len())
            .sum()
    }

    pub fn get(&self, at: &DashboardRef) -> Option<&DashboardEntry> {
        self.company.get(&at.department)?.get(&at.section)?.get(&at.name)
    }

    pub fn get_mut(&mut self, at: &DashboardRef) -> Option<&mut DashboardEntry> {
        self.company
            .get_mut(&at.department)?
            .get_mut(&at.section)?
            .get_mut(&at.name)
    }

    /// dashIds shared by more than one dashboard, in first-seen order.
    pub fn duplicate_dash_ids(&self) -> Vec<String> {
        let mut seen: IndexMap<&str, usize> = IndexMap::new();
        for (_, entry) in self.dashboards() {
            if !entry.dash_id.is_empty() {
                *seen.entry(entry.dash_id.as_str()).or_default() += 1;
            }
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect()
    }
}
