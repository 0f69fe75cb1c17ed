// Manifest builder - Converts spreadsheet rows into the nested manifest
use crate::domain::manifest::{
    DashboardEntry, DashboardFile, DashboardRef, Dataset, FileKind, Manifest, generated_file_id,
};
use indexmap::IndexMap;
use std::collections::HashMap;

/// One sheet row keyed by header name.
pub type SheetRow = IndexMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub manifest: Manifest,
    pub warnings: Vec<String>,
}

/// First non-empty trimmed cell among the given column aliases.
fn cell(row: &SheetRow, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|name| row.get(*name))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or("")
        .to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Build the manifest from the databases and files sheets. Invalid rows are
/// skipped with a warning; nothing here is fatal.
pub fn build_manifest(db_rows: &[SheetRow], file_rows: &[SheetRow]) -> BuildReport {
    let mut report = BuildReport::default();

    for (i, row) in db_rows.iter().enumerate() {
        let row_number = i + 2;
        let department = cell(row, &["Department"]);
        let section = cell(row, &["Section"]);
        let dash_id = cell(row, &["DB_ID", "DBId", "db_id"]);
        let name = cell(row, &["DB_Name", "DBName", "DB"]);

        if department.is_empty() || section.is_empty() || dash_id.is_empty() || name.is_empty() {
            report.warnings.push(format!(
                "Databases sheet row {}: missing required fields (Department, Section, DB_ID, DB_Name).",
                row_number
            ));
            continue;
        }

        let entry = DashboardEntry {
            dash_id,
            kind: non_empty(cell(row, &["DB_Type", "Type"])),
            embed_url: non_empty(cell(row, &["EmbedURL", "EmbedUrl"])),
            description: cell(row, &["Description"]),
            dataset: Dataset::default(),
        };
        report
            .manifest
            .company
            .entry(department)
            .or_default()
            .entry(section)
            .or_default()
            .insert(name, entry);
    }

    // later rows with the same dashId shadow earlier ones
    let by_id: HashMap<String, DashboardRef> = report
        .manifest
        .dashboards()
        .map(|(at, entry)| (entry.dash_id.clone(), at))
        .collect();

    for (i, row) in file_rows.iter().enumerate() {
        let row_number = i + 2;
        let dash_id = cell(row, &["DB_ID", "dbId", "db_id"]);
        let name = cell(row, &["File_Name", "FileName", "Name"]);
        let url = cell(row, &["URL", "Url", "Link"]);

        if dash_id.is_empty() || name.is_empty() || url.is_empty() {
            report.warnings.push(format!(
                "Files sheet row {}: DB_ID, File_Name and URL are required.",
                row_number
            ));
            continue;
        }

        let Some(entry) = by_id.get(&dash_id).and_then(|at| report.manifest.get_mut(at)) else {
            report.warnings.push(format!(
                "Files sheet row {}: DB_ID '{}' not found in Databases sheet.",
                row_number, dash_id
            ));
            continue;
        };

        let id = non_empty(cell(row, &["File_ID", "FileId", "file_id"])).unwrap_or_else(|| generated_file_id(i));
        entry.dataset.files.push(DashboardFile {
            id,
            name,
            kind: FileKind::infer(&cell(row, &["File_Type", "Type"]), &url),
            url,
            description: cell(row, &["Description"]),
        });
    }

    for id in report.manifest.duplicate_dash_ids() {
        report.warnings.push(format!(
            "DB_ID '{}' is used by more than one dashboard; files attach to the last one.",
            id
        ));
    }

    tracing::debug!(
        "Built manifest: {} dashboards, {} warnings",
        report.manifest.dashboard_count(),
        report.warnings.len()
    );
    report
}
