use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chart_schema::ChartDocument;
use tempfile::NamedTempFile;

pub const DEFAULT_FILE_NAME: &str = "Chart.json";

/// `output` itself, or `output/Chart.json` when it names an existing directory.
pub fn resolve(output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(DEFAULT_FILE_NAME)
    } else {
        output.to_path_buf()
    }
}

/// Write `chart` to `path` through a temp file in the same directory, so a
/// failed write never leaves a truncated chart behind.
pub fn write_chart(path: &Path, chart: &ChartDocument) -> anyhow::Result<()> {
    let json = chart.to_json_pretty().context("failed to serialize chart")?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let write_failed = || format!("failed to write: {}", path.display());

    let mut tmp = NamedTempFile::new_in(dir).with_context(write_failed)?;
    tmp.write_all(json.as_bytes()).with_context(write_failed)?;
    #[cfg(unix)]
    {
        use std::{fs::Permissions, os::unix::fs::PermissionsExt};
        tmp.as_file()
            .set_permissions(Permissions::from_mode(0o644))
            .with_context(write_failed)?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(write_failed)?;

    Ok(())
}
