use super::layout::FieldDescriptor;

/// Zero-filled header buffer written field by field.
///
/// Writes are clipped to the bytes the descriptor owns; the layout tests
/// guarantee every descriptor fits inside the buffer.
pub struct PcmWriter {
    buf: Vec<u8>,
}

impl PcmWriter {
    pub fn new(len: usize) -> Self {
        Self { buf: vec![0u8; len] }
    }

    fn slot(&mut self, desc: &FieldDescriptor) -> &mut [u8] {
        debug_assert!(desc.end() <= self.buf.len(), "{} outside buffer", desc.name);
        let end = desc.end().min(self.buf.len());
        let start = desc.offset.min(end);
        &mut self.buf[start..end]
    }

    pub fn write_u8(&mut self, desc: &FieldDescriptor, value: u8) {
        if let Some(byte) = self.slot(desc).first_mut() {
            *byte = value;
        }
    }

    pub fn write_u32_le(&mut self, desc: &FieldDescriptor, value: u32) {
        let bytes = value.to_le_bytes();
        let slot = self.slot(desc);
        let len = slot.len().min(bytes.len());
        slot[..len].copy_from_slice(&bytes[..len]);
    }

    /// Left-justified; excess bytes are dropped, the rest stays null.
    pub fn write_padded(&mut self, desc: &FieldDescriptor, bytes: &[u8]) -> usize {
        let slot = self.slot(desc);
        let len = slot.len().min(bytes.len());
        slot[..len].copy_from_slice(&bytes[..len]);
        slot[len..].fill(0);
        len
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
