// Offline conversion: workbook -> datasets.json plus local file placeholders
use crate::application::manifest_builder::{BuildReport, build_manifest};
use crate::domain::manifest::{FileKind, Manifest};
use crate::infrastructure::workbook::{BuildError, Workbook};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BuildOutcome {
    pub report: BuildReport,
    pub output: PathBuf,
    pub placeholders: Vec<PathBuf>,
}

pub fn build_from_workbook(workbook_dir: &Path, output: &Path, public_dir: &Path) -> Result<BuildOutcome, BuildError> {
    let workbook = Workbook::open(workbook_dir)?;
    let report = build_manifest(&workbook.databases, &workbook.files);

    write_manifest(&report.manifest, output)?;
    let placeholders = create_placeholders(&report.manifest, public_dir)?;

    tracing::info!(
        "Wrote {} ({} dashboards, {} warnings, {} new placeholders)",
        output.display(),
        report.manifest.dashboard_count(),
        report.warnings.len(),
        placeholders.len()
    );
    Ok(BuildOutcome {
        report,
        output: output.to_path_buf(),
        placeholders,
    })
}

pub fn write_manifest(manifest: &Manifest, output: &Path) -> Result<(), BuildError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    let json = manifest.to_pretty_json()?;
    std::fs::write(output, json).map_err(|source| io_error(output, source))
}

/// Replace everything outside `[A-Za-z0-9_-]` with `_` and lowercase.
pub fn clean_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Drop a README placeholder for every local file so editors know where the
/// real file belongs. Existing placeholders are left alone; returns the new ones.
pub fn create_placeholders(manifest: &Manifest, public_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut created = Vec::new();

    for (at, entry) in manifest.dashboards() {
        let local_files: Vec<_> = entry
            .dataset
            .files
            .iter()
            .filter(|f| f.kind == FileKind::Local)
            .collect();
        if local_files.is_empty() {
            continue;
        }

        let leaf = if entry.dash_id.is_empty() {
            at.name.split_whitespace().collect::<Vec<_>>().join("_")
        } else {
            entry.dash_id.clone()
        };
        let relative = Path::new("data")
            .join(clean_segment(&at.department))
            .join(clean_segment(&at.section))
            .join(leaf);
        let folder = public_dir.join(&relative);
        std::fs::create_dir_all(&folder).map_err(|source| io_error(&folder, source))?;

        for file in local_files {
            let placeholder = folder.join(format!(".README_{}.md", file.id));
            if placeholder.exists() {
                continue;
            }
            let basename = file.url.rsplit('/').next().unwrap_or(&file.url);
            let target = format!(
                "/{}/{}",
                public_dir.join(&relative).to_string_lossy().replace('\\', "/").trim_matches('/'),
                basename
            );
            let body = format!("Placeholder for {}\n\nDrop the real file at: {}\n", file.name, target);
            std::fs::write(&placeholder, body).map_err(|source| io_error(&placeholder, source))?;
            created.push(placeholder);
        }
    }

    Ok(created)
}

fn io_error(path: &Path, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}
