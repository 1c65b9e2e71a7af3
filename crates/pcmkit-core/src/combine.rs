use std::path::Path;

use crate::formats::pcm::layout::TextField;
use crate::source::{SourceError, read_dru_file, read_pcm_file};
use crate::{CombinedDocument, DruReport, PcmHeaderSummary, PcmRecord};

pub const COMBINED_NOTE: &str = "Merged from the PCM header and the DRU report.";

impl From<&PcmRecord> for PcmHeaderSummary {
    fn from(record: &PcmRecord) -> Self {
        let text = |field: TextField| record.text(field).to_string();
        PcmHeaderSummary {
            header: record.header.clone(),
            test_count: record.test_count,
            numune_no: text(TextField::NumuneNo),
            tarih: text(TextField::Tarih),
            test_standarti: text(TextField::TestStandarti),
            laboratuvar: text(TextField::Laboratuvar),
            malzeme_kodu: text(TextField::MalzemeKodu),
            musteri_no: text(TextField::MusteriNo),
        }
    }
}

/// Merge a decoded PCM header with its DRU report.
///
/// # Examples
/// ```
/// use pcmkit_core::{PcmRecord, combine, parse_dru};
///
/// let report = parse_dru("Grafik\n1\t0.1\t120\t0.5\t1\t2").report;
/// let doc = combine(&PcmRecord::default(), report);
/// assert_eq!(doc.pcm_header.test_count, 1);
/// assert_eq!(doc.test_grafik["1"].len(), 1);
/// ```
pub fn combine(record: &PcmRecord, report: DruReport) -> CombinedDocument {
    CombinedDocument {
        pcm_header: PcmHeaderSummary::from(record),
        test_summary: report.tests,
        test_grafik: report.grafik,
        note: Some(COMBINED_NOTE.to_string()),
    }
}

/// Read a `.pcm` / `.dru` pair and merge them.
pub fn combine_files(pcm_path: &Path, dru_path: &Path) -> Result<CombinedDocument, SourceError> {
    let decoded = read_pcm_file(pcm_path)?;
    let parsed = read_dru_file(dru_path)?;
    Ok(combine(&decoded.record, parsed.report))
}
