//! Conversion between `PcmRecord` and the editable `PcmDocument`.

use tracing::warn;

use super::error::PcmWarning;
use super::layout::{self, TextField};
use super::record::{PcmRecord, TextFields};
use crate::PcmDocument;

/// Format label written into exported documents.
pub const FORMAT_VERSION: &str = "PCM304_V7.2.11";
pub const EXPORT_NOTE: &str =
    "test_data_raw_hex holds the per-test measurement block as raw hex; it is not parsed.";

impl From<&PcmRecord> for PcmDocument {
    fn from(record: &PcmRecord) -> Self {
        let text = |field: TextField| Some(record.text(field).to_string());
        PcmDocument {
            header: Some(record.header.clone()),
            version_bytes_hex: Some(record.version_bytes_hex()),
            test_count: Some(record.test_count),
            numune_no: text(TextField::NumuneNo),
            tarih: text(TextField::Tarih),
            test_standarti: text(TextField::TestStandarti),
            laboratuvar: text(TextField::Laboratuvar),
            malzeme_kodu: text(TextField::MalzemeKodu),
            musteri_no: text(TextField::MusteriNo),
            test_data_raw_hex: Some(record.opaque_tail_hex()),
            format_version: Some(FORMAT_VERSION.to_string()),
            note: Some(EXPORT_NOTE.to_string()),
        }
    }
}

impl PcmRecord {
    /// Build a record from a possibly partial document.
    ///
    /// Missing keys take the defaults in `layout`. Malformed hex never fails:
    /// the version block falls back to `DEFAULT_VERSION_BYTES` and the tail
    /// keeps its longest valid leading run of byte pairs.
    pub fn from_document(doc: &PcmDocument) -> (PcmRecord, Vec<PcmWarning>) {
        let mut warnings = Vec::new();

        let version_bytes = match doc.version_bytes_hex.as_deref() {
            None | Some("") => layout::DEFAULT_VERSION_BYTES,
            Some(raw) => match decode_version_bytes(raw) {
                Ok(bytes) => bytes,
                Err(reason) => {
                    warnings.push(PcmWarning::MalformedHex {
                        field: "version_bytes_hex",
                        reason,
                        fallback: "using default version bytes",
                    });
                    layout::DEFAULT_VERSION_BYTES
                }
            },
        };

        let opaque_tail = match doc.test_data_raw_hex.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => {
                let (bytes, reason) = decode_hex_prefix(raw);
                if let Some(reason) = reason {
                    warnings.push(PcmWarning::MalformedHex {
                        field: "test_data_raw_hex",
                        reason,
                        fallback: "kept the valid leading bytes",
                    });
                }
                bytes
            }
        };

        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let record = PcmRecord {
            header: doc
                .header
                .clone()
                .unwrap_or_else(|| layout::DEFAULT_HEADER_TAG.to_string()),
            version_bytes,
            test_count: doc.test_count.unwrap_or(layout::DEFAULT_TEST_COUNT),
            texts: TextFields {
                numune_no: text(&doc.numune_no),
                tarih: text(&doc.tarih),
                test_standarti: text(&doc.test_standarti),
                laboratuvar: text(&doc.laboratuvar),
                malzeme_kodu: text(&doc.malzeme_kodu),
                musteri_no: text(&doc.musteri_no),
            },
            opaque_tail,
        };

        for warning in &warnings {
            warn!(%warning, "recovered while reading PCM document");
        }

        (record, warnings)
    }
}

fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

/// Decoded bytes land at the start of the block; missing bytes stay zero and
/// extra bytes are ignored.
fn decode_version_bytes(raw: &str) -> Result<[u8; layout::VERSION_BYTES_LEN], String> {
    let bytes = hex::decode(strip_whitespace(raw)).map_err(|err| err.to_string())?;
    let mut out = [0u8; layout::VERSION_BYTES_LEN];
    let len = bytes.len().min(out.len());
    out[..len].copy_from_slice(&bytes[..len]);
    Ok(out)
}

fn decode_hex_prefix(raw: &str) -> (Vec<u8>, Option<String>) {
    let compact = strip_whitespace(raw);
    match hex::decode(&compact) {
        Ok(bytes) => (bytes, None),
        Err(err) => {
            let valid = compact
                .bytes()
                .take_while(u8::is_ascii_hexdigit)
                .count()
                & !1;
            let bytes = hex::decode(&compact[..valid]).unwrap_or_default();
            (bytes, Some(err.to_string()))
        }
    }
}
