use tracing::{debug, warn};

use super::error::{PcmError, PcmWarning};
use super::layout::{self, Field};
use super::reader::PcmReader;
use super::record::PcmRecord;

/// Result of decoding a PCM buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub record: PcmRecord,
    pub warnings: Vec<PcmWarning>,
}

/// Decode a PCM304 buffer into a record.
///
/// Every field in `layout::FIELDS` is read at its declared offset; the bytes
/// from `layout::TAIL_OFFSET` onward are kept verbatim as the opaque tail.
///
/// # Errors
/// Returns `PcmError::TruncatedInput` when the buffer is shorter than
/// `layout::MIN_LEN`.
pub fn decode_pcm(payload: &[u8]) -> Result<Decoded, PcmError> {
    let reader = PcmReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let mut record = PcmRecord::default();
    let mut warnings = Vec::new();
    let mut mirror = None;

    for desc in &layout::FIELDS {
        match desc.field {
            Field::HeaderTag => {
                let (tag, lossy) = reader.read_ascii_tag(desc)?;
                if lossy {
                    warnings.push(PcmWarning::UndecodableText { field: desc.name });
                }
                record.header = tag;
            }
            Field::VersionBytes => {
                record.version_bytes = reader.read_array(desc)?;
            }
            Field::TestCount => {
                record.test_count = reader.read_u32_le(desc)?;
            }
            Field::TestCountMirror => {
                mirror = Some(reader.read_u32_le(desc)?);
            }
            Field::Text(text_field) => {
                let (text, lossy) = reader.read_legacy_text(desc)?;
                if lossy {
                    warnings.push(PcmWarning::UndecodableText { field: desc.name });
                }
                record.set_text(text_field, text);
            }
            // derived from the text on encode
            Field::TextLength(_) => {}
        }
    }

    if let Some(mirror) = mirror {
        if mirror != record.test_count {
            warn!(
                primary = record.test_count,
                mirror, "test count mirror disagrees with primary; keeping primary"
            );
        }
    }

    record.opaque_tail = reader.remainder(layout::TAIL_OFFSET)?.to_vec();

    for warning in &warnings {
        warn!(%warning, "recovered while decoding PCM");
    }
    debug!(
        test_count = record.test_count,
        tail_len = record.opaque_tail.len(),
        "decoded PCM"
    );

    Ok(Decoded { record, warnings })
}
