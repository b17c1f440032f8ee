//! Builders for synthetic chunk streams used across the unit tests.

use crate::signature::Signature;

/// First twelve bytes of an IDAT body: compression method, zlib check byte,
/// Huffman preamble, zlib checksum.
pub(crate) const IDAT_SUB_HEADER: [u8; 12] = [
    0x78, 0x9c, 0x63, 0x60, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x01,
];

pub(crate) struct StreamBuilder {
    bytes: Vec<u8>,
}
impl StreamBuilder {
    pub(crate) fn new() -> Self {
        Self {
            bytes: Signature::CANONICAL.to_vec(),
        }
    }

    pub(crate) fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend(bytes);
        self
    }

    pub(crate) fn chunk(mut self, length: u32, tag: &[u8; 4], body: &[u8]) -> Self {
        self.bytes.extend(length.to_be_bytes());
        self.bytes.extend(tag);
        self.bytes.extend(body);
        self
    }

    pub(crate) fn ihdr(self, width: u32, height: u32) -> Self {
        let mut body = vec![];
        body.extend(width.to_be_bytes());
        body.extend(height.to_be_bytes());
        body.extend([8, 6, 0, 0, 0]);
        body.extend(0xdead_beef_u32.to_be_bytes());
        self.chunk(13, b"IHDR", &body)
    }

    pub(crate) fn idat(self, payload: &[u8]) -> Self {
        let mut body = IDAT_SUB_HEADER.to_vec();
        body.extend(0x0102_0304_u32.to_be_bytes());
        body.extend(payload);
        self.chunk(payload.len() as u32 + 12, b"IDAT", &body)
    }

    pub(crate) fn iend(self) -> Self {
        self.chunk(0, b"IEND", &[0xae, 0x42, 0x60, 0x82])
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.bytes
    }
}
