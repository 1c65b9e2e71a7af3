//! File boundary: the only place this crate touches the file system.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::formats::dru::{ParsedDru, decode_dru_bytes, parse_dru};
use crate::formats::pcm::{Decoded, decode_pcm};
use crate::{DruError, PcmDocument, PcmError};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCM decode error: {0}")]
    Pcm(#[from] PcmError),
    #[error("DRU decode error: {0}")]
    Decode(#[from] DruError),
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),
}

/// Read and decode a `.pcm` file.
///
/// # Errors
/// Returns `SourceError::Io` when the file cannot be read and
/// `SourceError::Pcm` when it is shorter than the fixed header.
pub fn read_pcm_file(path: &Path) -> Result<Decoded, SourceError> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), len = bytes.len(), "read PCM file");
    Ok(decode_pcm(&bytes)?)
}

pub fn write_pcm_file(path: &Path, bytes: &[u8]) -> Result<(), SourceError> {
    fs::write(path, bytes)?;
    debug!(path = %path.display(), len = bytes.len(), "wrote PCM file");
    Ok(())
}

/// Read, decode and parse a `.dru` report.
///
/// # Errors
/// Fails only when the file cannot be read or is not Windows-1254 text;
/// malformed lines are dropped and reported in `ParsedDru::warnings`.
pub fn read_dru_file(path: &Path) -> Result<ParsedDru, SourceError> {
    let bytes = fs::read(path)?;
    let text = decode_dru_bytes(&bytes)?;
    debug!(path = %path.display(), len = bytes.len(), "read DRU file");
    Ok(parse_dru(&text))
}

/// Read an editable JSON document.
pub fn read_document_file(path: &Path) -> Result<PcmDocument, SourceError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write an editable JSON document, pretty-printed.
pub fn write_document_file(path: &Path, doc: &PcmDocument) -> Result<(), SourceError> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    Ok(())
}
