use super::layout::{self, TextField};

/// Decoded PCM304 file.
///
/// Produced by `decode_pcm` and consumed by `encode_pcm`. Length-prefix
/// bytes and the test-count mirror are not stored; they are derived on
/// encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmRecord {
    pub header: String,
    pub version_bytes: [u8; layout::VERSION_BYTES_LEN],
    pub test_count: u32,
    pub texts: TextFields,
    /// Everything from `TAIL_OFFSET` to the end of the file, never interpreted.
    pub opaque_tail: Vec<u8>,
}

impl Default for PcmRecord {
    fn default() -> Self {
        Self {
            header: layout::DEFAULT_HEADER_TAG.to_string(),
            version_bytes: layout::DEFAULT_VERSION_BYTES,
            test_count: layout::DEFAULT_TEST_COUNT,
            texts: TextFields::default(),
            opaque_tail: Vec::new(),
        }
    }
}

impl PcmRecord {
    pub fn text(&self, field: TextField) -> &str {
        self.texts.get(field)
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.texts.get_mut(field) = value.into();
    }

    pub fn opaque_tail_hex(&self) -> String {
        hex::encode(&self.opaque_tail)
    }

    pub fn version_bytes_hex(&self) -> String {
        hex::encode(self.version_bytes)
    }

    /// Total size `encode_pcm` will produce for this record.
    pub fn encoded_len(&self) -> usize {
        layout::HEADER_SIZE + self.opaque_tail.len()
    }
}

/// Specimen metadata text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFields {
    pub numune_no: String,
    pub tarih: String,
    pub test_standarti: String,
    pub laboratuvar: String,
    pub malzeme_kodu: String,
    pub musteri_no: String,
}

impl TextFields {
    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::NumuneNo => &self.numune_no,
            TextField::Tarih => &self.tarih,
            TextField::TestStandarti => &self.test_standarti,
            TextField::Laboratuvar => &self.laboratuvar,
            TextField::MalzemeKodu => &self.malzeme_kodu,
            TextField::MusteriNo => &self.musteri_no,
        }
    }

    pub fn get_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::NumuneNo => &mut self.numune_no,
            TextField::Tarih => &mut self.tarih,
            TextField::TestStandarti => &mut self.test_standarti,
            TextField::Laboratuvar => &mut self.laboratuvar,
            TextField::MalzemeKodu => &mut self.malzeme_kodu,
            TextField::MusteriNo => &mut self.musteri_no,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PcmRecord;
    use crate::formats::pcm::layout::{self, TextField};

    #[test]
    fn default_record_uses_documented_defaults() {
        let record = PcmRecord::default();
        assert_eq!(record.header, layout::DEFAULT_HEADER_TAG);
        assert_eq!(record.version_bytes_hex(), "0701010000000000");
        assert_eq!(record.test_count, 1);
        assert_eq!(record.encoded_len(), layout::HEADER_SIZE);
    }

    #[test]
    fn set_text_targets_named_field() {
        let mut record = PcmRecord::default();
        record.set_text(TextField::Laboratuvar, "GÜNEŞ YAPI");
        assert_eq!(record.texts.laboratuvar, "GÜNEŞ YAPI");
        assert_eq!(record.text(TextField::Laboratuvar), "GÜNEŞ YAPI");
        assert_eq!(record.text(TextField::NumuneNo), "");
    }
}
