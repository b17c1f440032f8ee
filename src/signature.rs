use log::debug;

use crate::{cursor::ByteCursor, error::CursorError};

pub(crate) const SIGNATURE_LEN: usize = 8;

/// The 8-byte file signature, split into its logical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Has the high bit set to catch transports that strip 8-bit data.
    pub high_bit: u8,
    pub tag: [u8; 3],
    pub dos_line_ending: [u8; 2],
    pub dos_eof: u8,
    pub unix_line_ending: u8,
}
impl Signature {
    pub const CANONICAL: [u8; SIGNATURE_LEN] = *b"\x89PNG\r\n\x1a\n";

    pub fn is_png(&self) -> bool {
        &self.tag == b"PNG"
    }

    /// Whether all eight bytes match the signature a valid PNG carries.
    pub fn is_canonical(&self) -> bool {
        self.to_bytes() == Self::CANONICAL
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let [t0, t1, t2] = self.tag;
        let [d0, d1] = self.dos_line_ending;
        [
            self.high_bit,
            t0,
            t1,
            t2,
            d0,
            d1,
            self.dos_eof,
            self.unix_line_ending,
        ]
    }
}

/// Reads the signature from the start of the source. The tag is not checked
/// here; see [`Signature::is_png`].
pub fn read_signature(cursor: &mut ByteCursor<'_>) -> Result<Signature, CursorError> {
    cursor.seek(0)?;
    if cursor.size() < SIGNATURE_LEN {
        return Err(CursorError::Truncated {
            offset: 0,
            requested: SIGNATURE_LEN,
            available: cursor.size(),
        });
    }
    let signature = Signature {
        high_bit: cursor.read_u8()?,
        tag: cursor.read_array()?,
        dos_line_ending: cursor.read_array()?,
        dos_eof: cursor.read_u8()?,
        unix_line_ending: cursor.read_u8()?,
    };
    debug!("read signature {:02x?}", signature.to_bytes());
    Ok(signature)
}
