use thiserror::Error;

/// Section a report line was classified into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Summary,
    Graph,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Summary => f.write_str("summary"),
            Section::Graph => f.write_str("graph"),
        }
    }
}

/// Lines the DRU parser drops instead of failing.
///
/// # Examples
/// ```
/// use pcmkit_core::{DruWarning, Section};
///
/// let warning = DruWarning::MalformedLine {
///     line: 4,
///     section: Section::Summary,
///     columns: 5,
///     needed: 11,
/// };
/// assert!(warning.to_string().contains("line 4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DruWarning {
    #[error("line {line} ({section}): {columns} columns, need {needed}; dropped")]
    MalformedLine {
        line: usize,
        section: Section,
        columns: usize,
        needed: usize,
    },
}

/// Fatal DRU errors: the report text could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DruError {
    #[error("report is not Windows-1254 text: undefined byte 0x{value:02X} at offset {offset}")]
    Undecodable { offset: usize, value: u8 },
}
