use tracing::{debug, warn};

use super::error::{DruError, DruWarning, Section};
use super::layout;
use crate::formats::common::codepage;
use crate::{DruReport, GraphSample, TestSummary};

/// Parsed report plus the lines that were dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDru {
    pub report: DruReport,
    pub warnings: Vec<DruWarning>,
}

/// Decode raw report bytes from the legacy code page.
///
/// # Errors
/// Returns `DruError::Undecodable` on the first byte Windows-1254 leaves
/// undefined.
pub fn decode_dru_bytes(bytes: &[u8]) -> Result<String, DruError> {
    codepage::decode_strict(bytes).map_err(|err| DruError::Undecodable {
        offset: err.offset,
        value: err.value,
    })
}

/// Parse decoded report text.
///
/// Lines before the `Grafik` marker are summary rows; lines after it are
/// graph samples. There is no way back to the summary section. Rows with too
/// few columns are dropped and reported as warnings. Lines end at `\r\n`,
/// `\n` or a lone `\r`.
pub fn parse_dru(text: &str) -> ParsedDru {
    let mut parser = DruParser::new();
    for line in split_lines(text) {
        parser.push_line(line);
    }
    parser.finish()
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(|c: char| c == '\r' || c == '\n').unwrap_or(rest.len());
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") {
            2
        } else {
            usize::from(end < rest.len())
        };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

/// Line-at-a-time report parser.
#[derive(Debug, Default)]
pub struct DruParser {
    section: Section,
    line_no: usize,
    parsed: ParsedDru,
}

impl DruParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn push_line(&mut self, raw: &str) {
        self.line_no += 1;
        let line = codepage::strip(raw);
        if line.is_empty() {
            return;
        }
        if line.starts_with(layout::GRAPH_MARKER) {
            if self.section != Section::Graph {
                debug!(line = self.line_no, "entering graph section");
            }
            self.section = Section::Graph;
            return;
        }

        match self.section {
            Section::Summary => self.summary_line(line),
            Section::Graph => self.graph_line(line),
        }
    }

    fn summary_line(&mut self, line: &str) {
        if layout::SUMMARY_HEADER_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
        {
            return;
        }
        let Some(cols) = self.columns(line, Section::Summary, layout::SUMMARY_MIN_COLUMNS) else {
            return;
        };
        self.parsed.report.tests.push(TestSummary {
            test_no: cols[layout::TEST_NO].to_string(),
            test_tipi: cols[layout::TEST_TIPI].to_string(),
            anma_capi: cols[layout::ANMA_CAPI].to_string(),
            sinifi: cols[layout::SINIFI].to_string(),
            ilk_boy: cols[layout::ILK_BOY].to_string(),
            kutle: cols[layout::KUTLE].to_string(),
            birim_kutle: cols[layout::BIRIM_KUTLE].to_string(),
            akma: cols[layout::AKMA].to_string(),
            cekme: cols[layout::CEKME].to_string(),
            cekme_akma: cols[layout::CEKME_AKMA].to_string(),
            kopma_uzamasi: cols[layout::KOPMA_UZAMASI].to_string(),
        });
    }

    fn graph_line(&mut self, line: &str) {
        if line.starts_with(layout::GRAPH_HEADER_PREFIX) {
            return;
        }
        let Some(cols) = self.columns(line, Section::Graph, layout::GRAPH_MIN_COLUMNS) else {
            return;
        };
        let sample = GraphSample {
            zaman: cols[layout::ZAMAN].to_string(),
            kuvvet_n: cols[layout::KUVVET_N].to_string(),
            cetvel_mm: cols[layout::CETVEL_MM].to_string(),
            kanal3: cols[layout::KANAL3].to_string(),
            kanal4: cols[layout::KANAL4].to_string(),
        };
        self.parsed
            .report
            .grafik
            .entry(cols[layout::SPECIMEN].to_string())
            .or_default()
            .push(sample);
    }

    /// Split on tabs and trim each cell; `None` when the row is too short.
    fn columns<'l>(
        &mut self,
        line: &'l str,
        section: Section,
        needed: usize,
    ) -> Option<Vec<&'l str>> {
        let cols: Vec<&str> = line
            .split(layout::COLUMN_SEPARATOR)
            .map(codepage::strip)
            .collect();
        if cols.len() < needed {
            let warning = DruWarning::MalformedLine {
                line: self.line_no,
                section,
                columns: cols.len(),
                needed,
            };
            warn!(%warning, "dropping report line");
            self.parsed.warnings.push(warning);
            return None;
        }
        Some(cols)
    }

    pub fn finish(self) -> ParsedDru {
        debug!(
            tests = self.parsed.report.tests.len(),
            specimens = self.parsed.report.grafik.len(),
            "parsed DRU report"
        );
        self.parsed
    }
}
