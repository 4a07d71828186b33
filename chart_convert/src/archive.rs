use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::ConvertError;

/// Extension of chart files inside an `.mcz` archive.
const CHART_EXTENSION: &str = "mc";

/// An archive unpacked into a private scratch directory.
///
/// The directory and everything in it is removed when this value is dropped.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
}

impl ExtractedArchive {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Chart files in the archive, relative to its root, sorted by path.
    pub fn candidates(&self) -> Vec<PathBuf> {
        WalkDir::new(self.path())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(CHART_EXTENSION))
            })
            .filter_map(|e| e.path().strip_prefix(self.path()).ok().map(Path::to_path_buf))
            .collect()
    }

    /// Remove the scratch directory now. Failure is only logged.
    pub fn close(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("failed to remove {}: {e}", path.display());
        } else {
            debug!("removed {}", path.display());
        }
    }
}

/// Unpack the zip at `path` into a fresh scratch directory.
pub fn extract(path: &Path) -> Result<ExtractedArchive, ConvertError> {
    let file_name = path.display().to_string();
    let file = File::open(path).map_err(|e| {
        ConvertError::new("E2001", format!("failed to open archive: {e}")).with_file(&file_name)
    })?;
    let mut zip = ZipArchive::new(file).map_err(|e| {
        ConvertError::new("E2001", format!("invalid archive: {e}")).with_file(&file_name)
    })?;

    let dir = tempfile::Builder::new()
        .prefix("chart2json-")
        .tempdir()
        .map_err(|e| {
            ConvertError::new("E2003", format!("failed to create scratch directory: {e}"))
                .with_file(&file_name)
        })?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| {
            ConvertError::new("E2002", format!("failed to read entry #{i}: {e}"))
                .with_file(&file_name)
        })?;
        let name = entry.name().to_string();
        let Some(relative) = entry.enclosed_name() else {
            return Err(ConvertError::new(
                "E2002",
                format!("entry escapes the archive root: {name}"),
            )
            .with_file(&file_name));
        };
        let out = dir.path().join(relative);

        let entry_error = |e: io::Error| {
            ConvertError::new("E2002", format!("failed to extract {name}: {e}")).with_file(&file_name)
        };
        if entry.is_dir() {
            fs::create_dir_all(&out).map_err(entry_error)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(entry_error)?;
        }
        let mut target = File::create(&out).map_err(entry_error)?;
        io::copy(&mut entry, &mut target).map_err(entry_error)?;
        debug!("extracted {}", out.display());
    }

    debug!("extracted {} entries from {}", zip.len(), file_name);
    Ok(ExtractedArchive { dir })
}

/// Pick one of `candidates`.
///
/// `select` matches a candidate's file name or relative path. Without it a
/// single candidate is taken as is, and several are handed to `choose`, which
/// returns an index or declines.
pub fn select_candidate<'c>(
    candidates: &'c [PathBuf],
    select: Option<&str>,
    choose: impl FnOnce(&[PathBuf]) -> Option<usize>,
) -> Result<&'c Path, ConvertError> {
    let names = || {
        candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect::<Vec<_>>()
    };

    if candidates.is_empty() {
        return Err(ConvertError::new("E3001", "no .mc chart found in archive"));
    }

    if let Some(wanted) = select {
        return candidates
            .iter()
            .find(|c| c.file_name().is_some_and(|n| n == wanted) || c.as_path() == Path::new(wanted))
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                ConvertError::new("E3003", format!("no chart named {wanted} in archive"))
                    .with_candidates(names())
            });
    }

    if let [only] = candidates {
        debug!("only one chart in archive, using {}", only.display());
        return Ok(only.as_path());
    }

    match choose(candidates) {
        Some(i) if i < candidates.len() => Ok(candidates[i].as_path()),
        _ => Err(ConvertError::new(
            "E3002",
            format!(
                "archive holds {} charts; pick one with --select ({})",
                candidates.len(),
                names().join(", ")
            ),
        )
        .with_candidates(names())),
    }
}
