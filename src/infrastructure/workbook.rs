// Workbook reader: a directory of tab-separated sheet exports
use crate::application::manifest_builder::SheetRow;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATABASE_SHEETS: &[&str] = &["Databases", "Database", "DBs"];
pub const FILE_SHEETS: &[&str] = &["Files", "Files "];

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("workbook not found: {0}")]
    WorkbookNotFound(PathBuf),

    #[error("could not find a sheet named '{0}' (case-sensitive) in the workbook")]
    MissingSheet(&'static str),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sheet {path}: {source}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Workbook {
    pub databases: Vec<SheetRow>,
    pub files: Vec<SheetRow>,
}

impl Workbook {
    pub fn open(dir: &Path) -> Result<Self, BuildError> {
        if !dir.is_dir() {
            return Err(BuildError::WorkbookNotFound(dir.to_path_buf()));
        }
        let databases = read_sheet(&find_sheet(dir, DATABASE_SHEETS).ok_or(BuildError::MissingSheet("Databases"))?)?;
        let files = read_sheet(&find_sheet(dir, FILE_SHEETS).ok_or(BuildError::MissingSheet("Files"))?)?;
        tracing::debug!(
            "Read workbook {}: {} database rows, {} file rows",
            dir.display(),
            databases.len(),
            files.len()
        );
        Ok(Self { databases, files })
    }
}

fn find_sheet(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(format!("{}.tsv", name)))
        .find(|path| path.is_file())
}

fn read_sheet(path: &Path) -> Result<Vec<SheetRow>, BuildError> {
    let raw = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sheet(&raw).map_err(|source| BuildError::Sheet {
        path: path.to_path_buf(),
        source,
    })
}

/// First record is the header. Cells may be quoted (embedded tabs, quotes
/// and newlines). Missing trailing cells read as empty; blank rows are skipped.
pub fn parse_sheet(raw: &str) -> Result<Vec<SheetRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.trim_start_matches('\u{feff}').as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(|c| c.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| (column.clone(), record.get(i).unwrap_or("").to_string()))
                .collect(),
        );
    }
    Ok(rows)
}
