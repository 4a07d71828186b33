use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use archive::ExtractedArchive;
use chart_schema::ChartDocument;
use log::debug;
use serde_json::Value;

pub mod archive;
mod assemble;
mod error;
pub mod fraction;
pub mod source;
pub mod tempo;

pub use assemble::assemble;
pub use error::{ConvertError, ConvertErrorKind, FieldError};
pub use source::{SourceFormat, TempoSource};

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Source format; detected from the document when `None`.
    pub format: Option<SourceFormat>,
    /// Chart to take from an archive holding several.
    pub select: Option<String>,
}

pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<ChartDocument, ConvertError> {
    let path = path.as_ref();
    debug!("reading {}", path.display());
    let bytes = fs::read(path).map_err(|e| {
        ConvertError::new("E1001", format!("failed to read input: {e}"))
            .with_file(path.display().to_string())
    })?;
    convert_slice(&bytes, options).map_err(|e| e.with_file(path.display().to_string()))
}

pub fn convert_reader(mut reader: impl Read, options: &ConvertOptions) -> Result<ChartDocument, ConvertError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ConvertError::new("E1002", format!("failed to read input stream: {e}")))?;
    convert_slice(&bytes, options)
}

pub fn convert_str(src: &str, options: &ConvertOptions) -> Result<ChartDocument, ConvertError> {
    convert_slice(src.as_bytes(), options)
}

fn convert_slice(bytes: &[u8], options: &ConvertOptions) -> Result<ChartDocument, ConvertError> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|e| ConvertError::new("E1101", format!("invalid chart json: {e}")))?;
    convert_value(&root, options)
}

/// Convert an already parsed source chart.
pub fn convert_value(root: &Value, options: &ConvertOptions) -> Result<ChartDocument, ConvertError> {
    let format = match options.format {
        Some(format) => format,
        None => SourceFormat::detect(root).ok_or_else(|| {
            ConvertError::new("E1201", "cannot detect source format; pass it explicitly")
        })?,
    };
    debug!("source format: {format}");

    let source = format.open(root)?;
    let offset = source.offset();
    let bpm_list = source.timeline();
    debug!("bpm list: {} entries", bpm_list.len());

    Ok(assemble(offset, bpm_list))
}

/// Convert the chart inside a Malody `.mcz` archive, failing if it holds
/// several and none was selected.
pub fn convert_archive(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<ChartDocument, ConvertError> {
    convert_archive_with(path, options, |_| None)
}

/// Like [`convert_archive`], asking `choose` when several charts remain.
pub fn convert_archive_with(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
    choose: impl FnOnce(&[PathBuf]) -> Option<usize>,
) -> Result<ChartDocument, ConvertError> {
    let extracted = archive::extract(path.as_ref())?;
    convert_extracted(extracted, options, choose)
}

/// Convert the selected chart, removing the scratch directory on every path.
fn convert_extracted(
    extracted: ExtractedArchive,
    options: &ConvertOptions,
    choose: impl FnOnce(&[PathBuf]) -> Option<usize>,
) -> Result<ChartDocument, ConvertError> {
    let candidates = extracted.candidates();
    let chart = archive::select_candidate(&candidates, options.select.as_deref(), choose)?;
    debug!("converting {}", chart.display());

    let options = ConvertOptions {
        format: Some(options.format.unwrap_or(SourceFormat::Malody)),
        ..options.clone()
    };
    let document = convert_file(extracted.path().join(chart), &options)?;

    extracted.close();
    Ok(document)
}
