//! Windows-1254 (Turkish) text handling shared by the PCM and DRU formats.

use std::borrow::Cow;

use encoding_rs::{EncoderResult, WINDOWS_1254};

/// Byte written in place of a character the code page cannot represent.
pub(crate) const ENCODE_REPLACEMENT: u8 = b'?';

/// Character emitted in place of a byte the code page leaves undefined.
pub(crate) const DECODE_REPLACEMENT: char = '\u{FFFD}';

/// Positions left unassigned by the Windows-1254 code page.
///
/// The WHATWG table maps these to C1 controls; the instrument software
/// treats them as undefined, so they are handled as undecodable here too.
const UNDEFINED_BYTES: [u8; 7] = [0x81, 0x8D, 0x8E, 0x8F, 0x90, 0x9D, 0x9E];

fn is_undefined(byte: u8) -> bool {
    UNDEFINED_BYTES.contains(&byte)
}

fn is_undefined_char(ch: char) -> bool {
    u8::try_from(u32::from(ch)).is_ok_and(is_undefined)
}

/// Byte that could not be decoded under strict rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndefinedByte {
    pub offset: usize,
    pub value: u8,
}

/// Whitespace as the instrument software strips it: Unicode whitespace plus
/// the ASCII separators 0x1C-0x1F.
fn is_strippable(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

pub(crate) fn strip(text: &str) -> &str {
    text.trim_matches(is_strippable)
}

/// Decode legacy bytes, substituting undefined positions.
///
/// Returns the text and whether any substitution happened.
pub(crate) fn decode_lossy(bytes: &[u8]) -> (String, bool) {
    let (decoded, _) = WINDOWS_1254.decode_without_bom_handling(bytes);
    // single-byte code page: one char per input byte
    let mut lossy = false;
    let text: String = decoded
        .chars()
        .zip(bytes)
        .map(|(ch, byte)| {
            if is_undefined(*byte) {
                lossy = true;
                DECODE_REPLACEMENT
            } else {
                ch
            }
        })
        .collect();
    (text, lossy)
}

/// Decode legacy bytes, failing on the first undefined position.
pub(crate) fn decode_strict(bytes: &[u8]) -> Result<String, UndefinedByte> {
    if let Some(offset) = bytes.iter().position(|b| is_undefined(*b)) {
        return Err(UndefinedByte {
            offset,
            value: bytes[offset],
        });
    }
    let (decoded, _) = WINDOWS_1254.decode_without_bom_handling(bytes);
    Ok(decoded.into_owned())
}

/// Encode text into the legacy code page, substituting unmappable characters.
///
/// Returns the bytes and whether any substitution happened.
pub(crate) fn encode_lossy(text: &str) -> (Vec<u8>, bool) {
    let source: Cow<'_, str> = if text.chars().any(is_undefined_char) {
        Cow::Owned(
            text.chars()
                .map(|ch| if is_undefined_char(ch) { DECODE_REPLACEMENT } else { ch })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    };

    let mut encoder = WINDOWS_1254.new_encoder();
    let mut out = Vec::with_capacity(source.len());
    let mut chunk = [0u8; 256];
    let mut lossy = false;
    let mut src: &str = &source;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut chunk, true);
        out.extend_from_slice(&chunk[..written]);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                out.push(ENCODE_REPLACEMENT);
                lossy = true;
            }
        }
    }

    (out, lossy)
}
