use tracing::{debug, warn};

use super::error::PcmWarning;
use super::layout::{self, Field};
use super::record::PcmRecord;
use super::writer::PcmWriter;
use crate::formats::common::codepage;

/// Result of encoding a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub warnings: Vec<PcmWarning>,
}

/// Character count stored in a length-prefix byte, saturating at 255.
pub fn length_prefix(text: &str) -> u8 {
    text.chars().count().min(layout::LENGTH_PREFIX_MAX) as u8
}

/// Encode a record into a PCM304 buffer.
///
/// The output is always `layout::HEADER_SIZE + record.opaque_tail.len()`
/// bytes. Text longer than its field is truncated without error; characters
/// outside the code page are written as `?` and reported.
pub fn encode_pcm(record: &PcmRecord) -> Encoded {
    let mut writer = PcmWriter::new(layout::HEADER_SIZE);
    let mut warnings = Vec::new();

    for desc in &layout::FIELDS {
        match desc.field {
            Field::HeaderTag => {
                let (bytes, lossy) = encode_ascii(&record.header);
                if lossy {
                    warnings.push(PcmWarning::UndecodableText { field: desc.name });
                }
                writer.write_padded(desc, &bytes);
            }
            Field::VersionBytes => {
                writer.write_padded(desc, &record.version_bytes);
            }
            Field::TestCount | Field::TestCountMirror => {
                writer.write_u32_le(desc, record.test_count);
            }
            Field::TextLength(text_field) => {
                writer.write_u8(desc, length_prefix(record.text(text_field)));
            }
            Field::Text(text_field) => {
                let text = record.text(text_field);
                let (bytes, lossy) = codepage::encode_lossy(text);
                if lossy {
                    warnings.push(PcmWarning::UndecodableText { field: desc.name });
                }
                let written = writer.write_padded(desc, &bytes);
                if written < bytes.len() {
                    debug!(
                        field = desc.name,
                        dropped = bytes.len() - written,
                        "text truncated to field width"
                    );
                }
            }
        }
    }

    let mut bytes = writer.into_inner();
    bytes.extend_from_slice(&record.opaque_tail);

    for warning in &warnings {
        warn!(%warning, "recovered while encoding PCM");
    }
    debug!(len = bytes.len(), "encoded PCM");

    Encoded { bytes, warnings }
}

fn encode_ascii(text: &str) -> (Vec<u8>, bool) {
    let mut lossy = false;
    let bytes: Vec<u8> = text
        .chars()
        .map(|ch| {
            if ch.is_ascii() {
                ch as u8
            } else {
                lossy = true;
                codepage::ENCODE_REPLACEMENT
            }
        })
        .collect();
    (bytes, lossy)
}
