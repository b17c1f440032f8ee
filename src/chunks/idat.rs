use std::ops::Index;

use log::{debug, trace, warn};
use nom::{
    bytes::complete::take,
    combinator::map_res,
    number::complete::{be_u32, u8},
    sequence::tuple,
};

use super::{
    ihdr::IHDR_LENGTH, read_frame_header, ChunkType, FrameHeader, ParseableChunk, FRAME_OVERHEAD,
};
use crate::{
    cursor::ByteCursor, decoder::DecodeOptions, error::ChunkError, signature::SIGNATURE_LEN,
};

/// Size of the fixed sub-header at the front of every IDAT body.
pub(crate) const IDAT_SUB_HEADER_LENGTH: u32 = 12;

/// Where the first frame after IHDR begins.
pub(crate) const FRAMES_OFFSET: usize = SIGNATURE_LEN + FRAME_OVERHEAD + IHDR_LENGTH as usize;

/// One IDAT frame. The frame owns its compressed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFrame {
    pub length: u32,
    pub chunk_type: ChunkType,
    pub compression_method: u8,
    pub zlib_check: u8,
    pub huffman_preamble: [u8; 6],
    pub zlib_checksum: u32,
    /// Stored as read; never verified.
    pub crc: u32,
    payload_len: usize,
    payload: Option<Vec<u8>>,
}
impl DataFrame {
    /// The type tag as four printable characters.
    pub fn ascii_type(&self) -> String {
        self.chunk_type.to_string()
    }

    /// Declared payload size: the frame length minus the sub-header.
    /// Unaffected by [`DataFrame::release`].
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// The still-compressed payload; empty once released.
    pub fn payload(&self) -> &[u8] {
        self.payload.as_deref().unwrap_or_default()
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload.unwrap_or_default()
    }

    pub fn is_released(&self) -> bool {
        self.payload.is_none()
    }

    /// Frees the payload buffer. Calling it again does nothing.
    pub fn release(&mut self) {
        self.payload = None;
    }
}
impl ParseableChunk for DataFrame {
    const HEADER: ChunkType = ChunkType::IDAT;

    fn from_cursor(cursor: &mut ByteCursor<'_>, frame: &FrameHeader) -> Result<Self, ChunkError> {
        let payload_len = frame
            .length
            .checked_sub(IDAT_SUB_HEADER_LENGTH)
            .ok_or(ChunkError::InvalidChunkLength(frame.length))? as usize;
        let (compression_method, zlib_check, huffman_preamble, zlib_checksum, crc) = cursor
            .parse(
                IDAT_SUB_HEADER_LENGTH as usize + 4,
                tuple((
                    u8,
                    u8,
                    map_res(take(6usize), |b: &[u8]| <[u8; 6]>::try_from(b)),
                    be_u32,
                    be_u32,
                )),
            )?;
        let payload = cursor.read_exact(payload_len)?.to_vec();
        trace!("IDAT at offset {}: {payload_len}B payload", frame.offset);
        Ok(DataFrame {
            length: frame.length,
            chunk_type: frame.chunk_type,
            compression_method,
            zlib_check,
            huffman_preamble,
            zlib_checksum,
            crc,
            payload_len,
            payload: Some(payload),
        })
    }
}

/// IDAT frames in file order.
///
/// The payloads are kept exactly as stored. The compressed stream is split
/// across frames, so it only makes sense once they are concatenated in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFrameSequence {
    frames: Vec<DataFrame>,
}
impl DataFrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataFrame> {
        self.frames.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DataFrame> {
        self.frames.get(index)
    }

    /// Sum of the declared payload sizes of every frame.
    pub fn compressed_len(&self) -> usize {
        self.frames.iter().map(DataFrame::payload_len).sum()
    }

    pub fn release(&mut self) {
        self.frames.iter_mut().for_each(DataFrame::release);
    }

    fn push(&mut self, frame: DataFrame) {
        self.frames.push(frame);
    }
}
impl Index<usize> for DataFrameSequence {
    type Output = DataFrame;
    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}
impl<'a> IntoIterator for &'a DataFrameSequence {
    type Item = &'a DataFrame;
    type IntoIter = std::slice::Iter<'a, DataFrame>;
    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
impl IntoIterator for DataFrameSequence {
    type Item = DataFrame;
    type IntoIter = std::vec::IntoIter<DataFrame>;
    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

/// Walks the frames following IHDR until IEND, collecting every IDAT.
///
/// Each frame is located from the previous frame's start and declared length.
/// Any chunk other than IDAT or IEND is rejected.
pub fn collect_frames(
    cursor: &mut ByteCursor<'_>,
    options: &DecodeOptions,
) -> Result<DataFrameSequence, ChunkError> {
    let mut frames = DataFrameSequence::default();
    let mut next = FRAMES_OFFSET;
    loop {
        cursor.seek(next)?;
        if cursor.at_end() {
            if options.require_iend {
                return Err(ChunkError::UnexpectedEndOfStream);
            }
            warn!(
                "stream ended after {} IDAT frame(s) without IEND",
                frames.len()
            );
            return Ok(frames);
        }
        let frame = read_frame_header(cursor)?;
        match frame.chunk_type {
            ChunkType::IEND => {
                debug!("IEND at offset {}, {} IDAT frame(s)", frame.offset, frames.len());
                return Ok(frames);
            }
            ChunkType::IDAT => frames.push(DataFrame::from_cursor(cursor, &frame)?),
            other => return Err(ChunkError::UnsupportedChunk(other)),
        }
        next = frame.next_offset();
    }
}
