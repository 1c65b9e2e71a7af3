//! PCM304 field layout.
//!
//! `FIELDS` is the only place offsets are declared; the parser and builder
//! both walk it. The test count is intentionally stored twice
//! (`TEST_COUNT` and `TEST_COUNT_MIRROR`).
//!
//! Three text fields are declared one byte longer than the gap to the next
//! field: the last byte of `numune_no` (0x7B), `tarih` (0x8F) and
//! `test_standarti` (0xB7) is also the length prefix of the field after it.
//! The prefix owns that byte, so those fields hold at most 29, 19 and 39
//! bytes of text. `max_length` keeps the declared length; `width` is what
//! the field actually owns and what `range()` covers. With that, every range
//! is disjoint.

use std::ops::Range;

/// Fixed header region; the opaque tail starts right after it.
pub const HEADER_SIZE: usize = 0x200;
pub const TAIL_OFFSET: usize = HEADER_SIZE;

pub const HEADER_TAG_LEN: usize = 16;
pub const VERSION_BYTES_LEN: usize = 8;
pub const U32_LEN: usize = 4;

/// Header tag written when a document does not carry one.
pub const DEFAULT_HEADER_TAG: &str = "PCM304 V7.2.11_";
/// Observed version block; only the first three bytes are known to vary.
pub const DEFAULT_VERSION_BYTES: [u8; VERSION_BYTES_LEN] = [0x07, 0x01, 0x01, 0, 0, 0, 0, 0];
pub const DEFAULT_TEST_COUNT: u32 = 1;
/// Largest value a length-prefix byte can hold.
pub const LENGTH_PREFIX_MAX: usize = u8::MAX as usize;

/// Representation of a field's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width ASCII, null padded.
    AsciiHeader,
    /// Null-terminated Windows-1254 text, whitespace trimmed on read.
    LegacyText,
    /// Unsigned 32-bit little-endian integer.
    Uint32Le,
    /// Raw bytes with no known structure.
    RawBytes,
    /// Single byte holding the character count of a text field (write only).
    LengthPrefixByte,
}

/// Text fields stored in the header, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    NumuneNo,
    Tarih,
    TestStandarti,
    Laboratuvar,
    MalzemeKodu,
    MusteriNo,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::NumuneNo,
        TextField::Tarih,
        TextField::TestStandarti,
        TextField::Laboratuvar,
        TextField::MalzemeKodu,
        TextField::MusteriNo,
    ];

    pub const fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub const fn descriptor(self) -> FieldDescriptor {
        match self {
            TextField::NumuneNo => NUMUNE_NO,
            TextField::Tarih => TARIH,
            TextField::TestStandarti => TEST_STANDARTI,
            TextField::Laboratuvar => LABORATUVAR,
            TextField::MalzemeKodu => MALZEME_KODU,
            TextField::MusteriNo => MUSTERI_NO,
        }
    }
}

/// Semantic identity of a layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    HeaderTag,
    VersionBytes,
    TestCount,
    /// Second copy of the test count; always written equal to `TestCount`.
    TestCountMirror,
    Text(TextField),
    TextLength(TextField),
}

/// One entry in the layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    pub name: &'static str,
    pub offset: usize,
    /// Length as declared by the format.
    pub max_length: usize,
    /// Bytes the field owns; less than `max_length` only for a text field
    /// whose last declared byte is the next field's length prefix.
    pub width: usize,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Declared bytes handed over to the following field.
    pub const fn shared_bytes(&self) -> usize {
        self.max_length - self.width
    }
}

const fn fixed(
    field: Field,
    name: &'static str,
    offset: usize,
    len: usize,
    kind: FieldKind,
) -> FieldDescriptor {
    FieldDescriptor {
        field,
        name,
        offset,
        max_length: len,
        width: len,
        kind,
    }
}

const fn text(field: TextField, name: &'static str, offset: usize, max_length: usize) -> FieldDescriptor {
    fixed(Field::Text(field), name, offset, max_length, FieldKind::LegacyText)
}

/// Text field that stops short of the length prefix of the field at
/// `next_offset`.
const fn text_before(
    field: TextField,
    name: &'static str,
    offset: usize,
    max_length: usize,
    next_offset: usize,
) -> FieldDescriptor {
    let mut desc = text(field, name, offset, max_length);
    let available = next_offset - 1 - offset;
    if available < max_length {
        desc.width = available;
    }
    desc
}

/// The prefix byte sits immediately before the text it describes.
const fn length_prefix(text: FieldDescriptor, name: &'static str) -> FieldDescriptor {
    let field = match text.field {
        Field::Text(field) => field,
        _ => panic!("length prefix must describe a text field"),
    };
    fixed(
        Field::TextLength(field),
        name,
        text.offset - 1,
        1,
        FieldKind::LengthPrefixByte,
    )
}

pub const HEADER_TAG: FieldDescriptor = fixed(
    Field::HeaderTag,
    "header",
    0x00,
    HEADER_TAG_LEN,
    FieldKind::AsciiHeader,
);

pub const VERSION_BYTES: FieldDescriptor = fixed(
    Field::VersionBytes,
    "version_bytes",
    0x10,
    VERSION_BYTES_LEN,
    FieldKind::RawBytes,
);

pub const TEST_COUNT: FieldDescriptor =
    fixed(Field::TestCount, "test_count", 0x38, U32_LEN, FieldKind::Uint32Le);

pub const TEST_COUNT_MIRROR: FieldDescriptor = fixed(
    Field::TestCountMirror,
    "test_count_mirror",
    0x1E8,
    U32_LEN,
    FieldKind::Uint32Le,
);

// declared 30/20/40 bytes; each loses its last byte to the next prefix
pub const NUMUNE_NO: FieldDescriptor =
    text_before(TextField::NumuneNo, "numune_no", 0x5E, 30, 0x7C);
pub const TARIH: FieldDescriptor = text_before(TextField::Tarih, "tarih", 0x7C, 20, 0x90);
pub const TEST_STANDARTI: FieldDescriptor =
    text_before(TextField::TestStandarti, "test_standarti", 0x90, 40, 0xB8);
pub const LABORATUVAR: FieldDescriptor = text(TextField::Laboratuvar, "laboratuvar", 0xB8, 80);
pub const MALZEME_KODU: FieldDescriptor =
    text(TextField::MalzemeKodu, "malzeme_kodu", 0x150, 50);
pub const MUSTERI_NO: FieldDescriptor = text(TextField::MusteriNo, "musteri_no", 0x19E, 40);

pub const NUMUNE_NO_LEN: FieldDescriptor = length_prefix(NUMUNE_NO, "numune_no_len");
pub const TARIH_LEN: FieldDescriptor = length_prefix(TARIH, "tarih_len");
pub const TEST_STANDARTI_LEN: FieldDescriptor =
    length_prefix(TEST_STANDARTI, "test_standarti_len");
pub const LABORATUVAR_LEN: FieldDescriptor = length_prefix(LABORATUVAR, "laboratuvar_len");
pub const MALZEME_KODU_LEN: FieldDescriptor = length_prefix(MALZEME_KODU, "malzeme_kodu_len");
pub const MUSTERI_NO_LEN: FieldDescriptor = length_prefix(MUSTERI_NO, "musteri_no_len");

/// Every known header field in offset order.
pub const FIELDS: [FieldDescriptor; 16] = [
    HEADER_TAG,
    VERSION_BYTES,
    TEST_COUNT,
    NUMUNE_NO_LEN,
    NUMUNE_NO,
    TARIH_LEN,
    TARIH,
    TEST_STANDARTI_LEN,
    TEST_STANDARTI,
    LABORATUVAR_LEN,
    LABORATUVAR,
    MALZEME_KODU_LEN,
    MALZEME_KODU,
    MUSTERI_NO_LEN,
    MUSTERI_NO,
    TEST_COUNT_MIRROR,
];

/// Minimum buffer length accepted by the decoder.
pub const MIN_LEN: usize = HEADER_SIZE;
