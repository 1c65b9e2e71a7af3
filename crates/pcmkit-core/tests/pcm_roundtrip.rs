use pcmkit_core::{FieldKind, PcmError, TextField, decode_pcm, encode_pcm, layout};
use proptest::prelude::*;

/// Bytes that decode to non-whitespace, defined Windows-1254 characters.
fn text_byte() -> impl Strategy<Value = u8> {
    prop_oneof![0x21u8..=0x7E, 0xC0u8..=0xFF]
}

fn text_bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(text_byte(), 0..=max)
}

#[derive(Debug, Clone)]
struct Canonical {
    tag: Vec<u8>,
    version: [u8; 8],
    count: u32,
    texts: Vec<Vec<u8>>,
    tail: Vec<u8>,
}

/// Buffers the encoder itself produces: unknown gaps zero, each prefix equal
/// to its text's length and every text inside the bytes its field owns.
fn canonical() -> impl Strategy<Value = Canonical> {
    let texts: Vec<_> = TextField::ALL
        .iter()
        .map(|field| text_bytes(field.descriptor().width))
        .collect();
    (
        prop::collection::vec(0x21u8..=0x7E, 0..=layout::HEADER_TAG_LEN),
        any::<[u8; 8]>(),
        any::<u32>(),
        texts,
        prop::collection::vec(any::<u8>(), 0..2048),
    )
        .prop_map(|(tag, version, count, texts, tail)| Canonical {
            tag,
            version,
            count,
            texts,
            tail,
        })
}

/// Lay a canonical buffer out by hand from the documented offsets.
fn assemble(c: &Canonical) -> Vec<u8> {
    let mut buf = vec![0u8; layout::HEADER_SIZE];
    buf[..c.tag.len()].copy_from_slice(&c.tag);
    buf[0x10..0x18].copy_from_slice(&c.version);
    buf[0x38..0x3C].copy_from_slice(&c.count.to_le_bytes());
    buf[0x1E8..0x1EC].copy_from_slice(&c.count.to_le_bytes());
    for (field, text) in TextField::ALL.iter().zip(&c.texts) {
        let offset = field.descriptor().offset;
        buf[offset - 1] = text.len() as u8;
        buf[offset..offset + text.len()].copy_from_slice(text);
    }
    buf.extend_from_slice(&c.tail);
    buf
}

/// Every text field filled to the last byte it owns.
fn full_width(c: &Canonical) -> Canonical {
    let texts = TextField::ALL
        .iter()
        .zip(&c.texts)
        .map(|(field, text)| {
            let fill = text.first().copied().unwrap_or(b'x');
            vec![fill; field.descriptor().width]
        })
        .collect();
    Canonical {
        texts,
        ..c.clone()
    }
}

proptest! {
    #[test]
    fn full_width_buffers_round_trip(c in canonical()) {
        let buf = assemble(&full_width(&c));
        let decoded = decode_pcm(&buf).unwrap();
        prop_assert!(decoded.warnings.is_empty());
        let encoded = encode_pcm(&decoded.record);
        prop_assert_eq!(&encoded.bytes[0x7B], &19u8);
        prop_assert_eq!(&encoded.bytes[0x8F], &39u8);
        prop_assert_eq!(&encoded.bytes[0xB7], &80u8);
        prop_assert_eq!(encoded.bytes, buf);
    }
}

proptest! {
    #[test]
    fn canonical_buffers_round_trip(c in canonical()) {
        let buf = assemble(&c);
        let decoded = decode_pcm(&buf).unwrap();
        prop_assert!(decoded.warnings.is_empty());
        let encoded = encode_pcm(&decoded.record);
        prop_assert_eq!(encoded.bytes, buf);
    }
}

proptest! {
    /// Arbitrary bytes settle after one pass: lossy substitutions become `?`
    /// and from then on decode/encode is a fixed point.
    #[test]
    fn arbitrary_buffers_settle_after_one_pass(
        buf in prop::collection::vec(any::<u8>(), layout::HEADER_SIZE..layout::HEADER_SIZE + 512),
    ) {
        let first = decode_pcm(&buf).unwrap().record;
        let second = decode_pcm(&encode_pcm(&first).bytes).unwrap().record;
        let third = decode_pcm(&encode_pcm(&second).bytes).unwrap().record;
        prop_assert_eq!(&third, &second);
        prop_assert_eq!(second.header, first.header.replace('\u{FFFD}', "?"));
        prop_assert_eq!(second.version_bytes, first.version_bytes);
        prop_assert_eq!(second.test_count, first.test_count);
        prop_assert_eq!(second.opaque_tail, first.opaque_tail);
    }
}

proptest! {
    #[test]
    fn encoded_test_count_is_mirrored(
        buf in prop::collection::vec(any::<u8>(), layout::HEADER_SIZE..layout::HEADER_SIZE + 64),
    ) {
        let record = decode_pcm(&buf).unwrap().record;
        let bytes = encode_pcm(&record).bytes;
        prop_assert_eq!(&bytes[0x38..0x3C], &bytes[0x1E8..0x1EC]);
        prop_assert_eq!(bytes.len(), layout::HEADER_SIZE + record.opaque_tail.len());
    }
}

proptest! {
    #[test]
    fn short_buffers_are_rejected(len in 0usize..layout::HEADER_SIZE) {
        let buf = vec![0u8; len];
        let err = decode_pcm(&buf).unwrap_err();
        prop_assert_eq!(err, PcmError::TruncatedInput { needed: layout::HEADER_SIZE, actual: len });
    }
}

#[test]
fn canonical_text_fields_survive_idempotence() {
    let c = Canonical {
        tag: b"PCM304 V7.2.11_".to_vec(),
        version: [7, 1, 1, 0, 0, 0, 0, 0],
        count: 3,
        texts: vec![
            b"D347-25".to_vec(),
            b"26.08.25".to_vec(),
            b"TS708".to_vec(),
            vec![b'G', 0xDC, b'N', b'E', 0xDE],
            b"BOLU".to_vec(),
            b"3742702213".to_vec(),
        ],
        tail: vec![0; 16],
    };
    let first = decode_pcm(&assemble(&c)).unwrap().record;
    let second = decode_pcm(&encode_pcm(&first).bytes).unwrap().record;
    assert_eq!(first, second);
    assert_eq!(first.texts.laboratuvar, "GÜNEŞ");
}

#[test]
fn layout_kinds_match_documented_table() {
    let kinds: Vec<(usize, FieldKind)> = layout::FIELDS
        .iter()
        .map(|desc| (desc.offset, desc.kind))
        .collect();
    assert_eq!(kinds[0], (0x00, FieldKind::AsciiHeader));
    assert_eq!(kinds[1], (0x10, FieldKind::RawBytes));
    assert_eq!(kinds[2], (0x38, FieldKind::Uint32Le));
    assert_eq!(kinds[3], (0x5D, FieldKind::LengthPrefixByte));
    assert_eq!(kinds[4], (0x5E, FieldKind::LegacyText));
    assert_eq!(kinds[15], (0x1E8, FieldKind::Uint32Le));
}
