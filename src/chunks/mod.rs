use std::fmt::{self, Write};

use log::trace;

use crate::{
    cursor::ByteCursor,
    error::{ChunkError, CursorError},
};

pub(crate) mod idat;
pub(crate) mod ihdr;

/// Bytes a frame spends on its length, type tag and trailing CRC.
pub(crate) const FRAME_OVERHEAD: usize = 12;

/// A 4-byte chunk type tag, compared byte for byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);
impl ChunkType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}
impl From<[u8; 4]> for ChunkType {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}
impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            if b.is_ascii_graphic() {
                f.write_char(b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}
impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({self})")
    }
}

/// The length and type tag that open every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Offset of the length field in the source.
    pub offset: usize,
    pub length: u32,
    pub chunk_type: ChunkType,
}
impl FrameHeader {
    /// Offset where the following frame starts.
    pub fn next_offset(&self) -> usize {
        self.offset
            .saturating_add(FRAME_OVERHEAD)
            .saturating_add(self.length as usize)
    }
}

pub fn read_frame_header(cursor: &mut ByteCursor<'_>) -> Result<FrameHeader, CursorError> {
    let offset = cursor.position();
    let length = cursor.read_be_u32()?;
    let chunk_type = ChunkType(cursor.read_array()?);
    trace!("frame {chunk_type} at offset {offset}, {length}B");
    Ok(FrameHeader {
        offset,
        length,
        chunk_type,
    })
}

pub(crate) trait ParseableChunk: Sized {
    const HEADER: ChunkType;

    /// Parses the chunk body that follows `frame`, with the cursor sitting
    /// right after the frame's type tag.
    fn from_cursor(cursor: &mut ByteCursor<'_>, frame: &FrameHeader) -> Result<Self, ChunkError>;
}
