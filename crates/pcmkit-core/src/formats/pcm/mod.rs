//! PCM304 binary record codec.
//!
//! A PCM file is a fixed 512-byte header followed by an opaque per-test
//! measurement block. The header holds an ASCII tag, a version block, the
//! test count (stored twice) and six Windows-1254 text fields, each preceded
//! by a one-byte length prefix. Only the header is interpreted; the tail is
//! carried as raw bytes so `encode_pcm(decode_pcm(b)) == b` holds for
//! canonical buffers.
//!
//! Offsets live in `layout`, safe reads in `reader`, placement in `writer`.
//! `parser` decodes, `builder` encodes, `document` converts to and from the
//! editable serde document.
//!
//! Türkçe özet:
//! Başlık 512 bayttır; metin alanları cp1254 ile kodlanır ve her birinin
//! önünde bir uzunluk baytı bulunur. Test verisi bloğu ham olarak saklanır.

pub mod builder;
pub mod document;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod record;
pub mod writer;

pub use builder::{Encoded, encode_pcm};
pub use parser::{Decoded, decode_pcm};

use crate::PcmDocument;
use record::PcmRecord;

/// Encode an editable document, applying defaults for missing keys.
///
/// Warnings from the document (malformed hex) come first, followed by any
/// raised while encoding text.
pub fn build_pcm(doc: &PcmDocument) -> Encoded {
    let (record, mut warnings) = PcmRecord::from_document(doc);
    let encoded = encode_pcm(&record);
    warnings.extend(encoded.warnings);
    Encoded {
        bytes: encoded.bytes,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_pcm, decode_pcm, encode_pcm};
    use crate::PcmDocument;
    use crate::formats::pcm::layout::{self, TextField};
    use crate::formats::pcm::record::PcmRecord;

    fn canonical_buffer() -> Vec<u8> {
        let mut buf = vec![0u8; layout::HEADER_SIZE];
        buf[..15].copy_from_slice(b"PCM304 V7.2.11_");
        buf[0x10..0x18].copy_from_slice(&[0x07, 0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00]);
        buf[0x38..0x3C].copy_from_slice(&2u32.to_le_bytes());
        buf[0x1E8..0x1EC].copy_from_slice(&2u32.to_le_bytes());
        let texts: [(usize, &[u8]); 6] = [
            (0x5E, b"D347-25"),
            (0x7C, b"26.08.25"),
            (0x90, b"TS 708 DEM\xDDR \xC7EKME"),
            (0xB8, b"G\xDCNE\xDE YAPI LAB."),
            (0x150, b"BE\xDEKAVAKLAR MAH.BOLU"),
            (0x19E, b"3742702213"),
        ];
        for (offset, text) in texts {
            buf[offset - 1] = text.len() as u8;
            buf[offset..offset + text.len()].copy_from_slice(text);
        }
        buf.extend((0..300u32).map(|i| (i * 7 % 256) as u8));
        buf
    }

    #[test]
    fn round_trip_is_byte_exact() {
        let buf = canonical_buffer();
        let decoded = decode_pcm(&buf).unwrap();
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.record.texts.laboratuvar, "GÜNEŞ YAPI LAB.");
        let encoded = encode_pcm(&decoded.record);
        assert_eq!(encoded.bytes, buf);
        assert!(encoded.warnings.is_empty());
    }

    #[test]
    fn round_trip_through_document() {
        let buf = canonical_buffer();
        let record = decode_pcm(&buf).unwrap().record;
        let doc = PcmDocument::from(&record);
        let json = serde_json::to_string(&doc).unwrap();
        let doc: PcmDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(build_pcm(&doc).bytes, buf);
    }

    #[test]
    fn build_collects_document_and_text_warnings() {
        let doc = PcmDocument {
            version_bytes_hex: Some("xyz".to_string()),
            numune_no: Some("№1".to_string()),
            ..PcmDocument::default()
        };
        let encoded = build_pcm(&doc);
        assert_eq!(encoded.bytes.len(), layout::HEADER_SIZE);
        assert_eq!(encoded.warnings.len(), 2);
        assert_eq!(&encoded.bytes[0x10..0x13], &[0x07, 0x01, 0x01]);
    }

    #[test]
    fn build_defaults_test_count_to_one() {
        let encoded = build_pcm(&PcmDocument::default());
        assert_eq!(&encoded.bytes[0x38..0x3C], &1u32.to_le_bytes());
        assert_eq!(&encoded.bytes[0x1E8..0x1EC], &1u32.to_le_bytes());
        assert_eq!(&encoded.bytes[..15], b"PCM304 V7.2.11_");
    }

    #[test]
    fn full_width_text_fields_survive_a_second_pass() {
        let mut record = PcmRecord::default();
        for field in TextField::ALL {
            let width = field.descriptor().width;
            record.set_text(field, "Ş".repeat(width));
        }
        let first = encode_pcm(&record).bytes;
        for offset in [0x7B, 0x8F, 0xB7] {
            let owner = TextField::ALL
                .iter()
                .map(|field| field.descriptor())
                .find(|desc| desc.offset == offset + 1)
                .expect("prefix precedes a text field");
            assert_eq!(first[offset] as usize, owner.width);
        }

        let decoded = decode_pcm(&first).unwrap();
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.record, record);
        assert_eq!(encode_pcm(&decoded.record).bytes, first);
    }

    #[test]
    fn over_long_text_settles_to_owned_width() {
        let mut record = PcmRecord::default();
        record.set_text(TextField::Tarih, "1".repeat(20));
        let first = encode_pcm(&record).bytes;
        assert_eq!(first[0x7B], 20);

        let once = decode_pcm(&first).unwrap().record;
        assert_eq!(once.texts.tarih, "1".repeat(19));
        let second = encode_pcm(&once).bytes;
        assert_eq!(second[0x7B], 19);
        assert_eq!(encode_pcm(&decode_pcm(&second).unwrap().record).bytes, second);
    }
}
