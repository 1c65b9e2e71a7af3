use super::error::PcmError;
use super::layout::{FieldDescriptor, U32_LEN};
use crate::formats::common::codepage;

pub struct PcmReader<'a> {
    payload: &'a [u8],
}

impl<'a> PcmReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), PcmError> {
        if self.payload.len() < needed {
            return Err(PcmError::TruncatedInput {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], PcmError> {
        self.payload
            .get(range.clone())
            .ok_or(PcmError::TruncatedInput {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    pub fn read_u32_le(&self, desc: &FieldDescriptor) -> Result<u32, PcmError> {
        let bytes = self.read_slice(desc.offset..desc.offset + U32_LEN)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_array<const N: usize>(&self, desc: &FieldDescriptor) -> Result<[u8; N], PcmError> {
        let bytes = self.read_slice(desc.offset..desc.offset + N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Fixed-width ASCII with trailing nulls removed. Non-ASCII bytes become
    /// U+FFFD; the flag reports whether that happened.
    pub fn read_ascii_tag(&self, desc: &FieldDescriptor) -> Result<(String, bool), PcmError> {
        let bytes = self.read_slice(desc.range())?;
        let mut lossy = false;
        let raw: String = bytes
            .iter()
            .map(|b| {
                if b.is_ascii() {
                    char::from(*b)
                } else {
                    lossy = true;
                    codepage::DECODE_REPLACEMENT
                }
            })
            .collect();
        Ok((raw.trim_end_matches('\0').to_string(), lossy))
    }

    /// Scan from the field offset to the first null, the end of the bytes the
    /// field owns (`desc.width`) or the end of the buffer.
    pub fn read_legacy_text(&self, desc: &FieldDescriptor) -> Result<(String, bool), PcmError> {
        let start = desc.offset;
        if start > self.payload.len() {
            return Err(PcmError::TruncatedInput {
                needed: start,
                actual: self.payload.len(),
            });
        }
        let limit = desc.end().min(self.payload.len());
        let window = &self.payload[start..limit];
        let end = window.iter().position(|b| *b == 0).unwrap_or(window.len());
        let (text, lossy) = codepage::decode_lossy(&window[..end]);
        Ok((codepage::strip(&text).to_string(), lossy))
    }

    pub fn remainder(&self, offset: usize) -> Result<&'a [u8], PcmError> {
        self.payload.get(offset..).ok_or(PcmError::TruncatedInput {
            needed: offset,
            actual: self.payload.len(),
        })
    }
}
