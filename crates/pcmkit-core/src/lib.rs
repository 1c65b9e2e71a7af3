//! pcmkit core library for PCM304 tensile-test files.
//!
//! This crate round-trips the instrument's binary `.pcm` records and parses
//! the accompanying tab-delimited `.dru` reports. Format modules follow a
//! layout/reader/parser structure and never touch the file system; file
//! access is isolated in `source`.
//!
//! Invariants:
//! - `encode_pcm(decode_pcm(b))` reproduces `b` for canonical buffers.
//! - The test count is always written to both of its offsets.
//! - Report cells are kept as the original text, never coerced to numbers.
//!
//! Türkçe özet:
//! Bu crate PCM304 ikili dosyalarını yapılandırılmış kayda çevirir ve
//! kayıttan aynı baytları yeniden üretir. DRU raporları sekmeyle ayrılmış
//! metin olarak okunur; "Grafik" satırından sonra ölçüm verisine geçilir.
//!
//! # Examples
//! ```
//! use pcmkit_core::{PcmDocument, build_pcm, decode_pcm};
//!
//! let doc = PcmDocument {
//!     numune_no: Some("D347-25".to_string()),
//!     ..PcmDocument::default()
//! };
//! let bytes = build_pcm(&doc).bytes;
//! let record = decode_pcm(&bytes)?.record;
//! assert_eq!(record.texts.numune_no, "D347-25");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod combine;
mod formats;
mod source;

pub use combine::{combine, combine_files};
pub use formats::dru::error::{DruError, DruWarning, Section};
pub use formats::dru::{DruParser, ParsedDru, decode_dru_bytes, parse_dru};
pub use formats::pcm::document::FORMAT_VERSION;
pub use formats::pcm::error::{PcmError, PcmWarning};
pub use formats::pcm::layout::{self, FieldDescriptor, FieldKind, TextField};
pub use formats::pcm::record::{PcmRecord, TextFields};
pub use formats::pcm::{Decoded, Encoded, build_pcm, decode_pcm, encode_pcm};
pub use source::{
    SourceError, read_document_file, read_dru_file, read_pcm_file, write_document_file,
    write_pcm_file,
};

/// Editable view of a PCM file.
///
/// Every key is optional when read back; missing keys take the defaults
/// documented in `layout`. Export always fills all of them.
///
/// # Examples
/// ```
/// use pcmkit_core::PcmDocument;
///
/// let doc: PcmDocument = serde_json::from_str(r#"{"tarih": "26.08.25"}"#)?;
/// assert_eq!(doc.tarih.as_deref(), Some("26.08.25"));
/// assert!(doc.test_count.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmDocument {
    /// ASCII tag at the start of the file (e.g., "PCM304 V7.2.11_").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Eight version bytes as hex; structure only partially known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_bytes_hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_count: Option<u32>,
    /// Specimen number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numune_no: Option<String>,
    /// Test date as written by the instrument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarih: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_standarti: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laboratuvar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malzeme_kodu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musteri_no: Option<String>,
    /// Opaque per-test measurement block as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data_raw_hex: Option<String>,
    #[serde(
        rename = "_format_version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<String>,
    #[serde(rename = "_note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Header fields shown next to report data (no raw blocks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmHeaderSummary {
    pub header: String,
    pub test_count: u32,
    pub numune_no: String,
    pub tarih: String,
    pub test_standarti: String,
    pub laboratuvar: String,
    pub malzeme_kodu: String,
    pub musteri_no: String,
}

/// One summary row of a DRU report.
///
/// Cells are the original text tokens; decimal separators are not normalised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub test_no: String,
    pub test_tipi: String,
    /// Nominal diameter.
    pub anma_capi: String,
    pub sinifi: String,
    /// Initial gauge length.
    pub ilk_boy: String,
    pub kutle: String,
    pub birim_kutle: String,
    /// Yield.
    pub akma: String,
    /// Tensile strength.
    pub cekme: String,
    pub cekme_akma: String,
    /// Elongation at break.
    pub kopma_uzamasi: String,
}

/// One time-series sample from the graph section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSample {
    pub zaman: String,
    pub kuvvet_n: String,
    pub cetvel_mm: String,
    pub kanal3: String,
    pub kanal4: String,
}

/// Parsed DRU report.
///
/// `grafik` is keyed by specimen number in first-seen order; a key need not
/// match any `tests` entry.
///
/// # Examples
/// ```
/// use pcmkit_core::parse_dru;
///
/// let report = parse_dru("Grafik\n1\t0.1\t120\t0.5\t1\t2").report;
/// assert!(report.tests.is_empty());
/// assert_eq!(report.grafik["1"][0].kuvvet_n, "120");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DruReport {
    pub tests: Vec<TestSummary>,
    pub grafik: IndexMap<String, Vec<GraphSample>>,
}

/// PCM header merged with its DRU report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedDocument {
    pub pcm_header: PcmHeaderSummary,
    pub test_summary: Vec<TestSummary>,
    pub test_grafik: IndexMap<String, Vec<GraphSample>>,
    #[serde(rename = "_note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
