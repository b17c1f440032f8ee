use log::debug;
use nom::{
    number::complete::{be_u32, u8},
    sequence::tuple,
};

use super::{read_frame_header, ChunkType, FrameHeader, ParseableChunk};
use crate::{cursor::ByteCursor, error::ChunkError, signature::SIGNATURE_LEN};

pub(crate) const IHDR_LENGTH: u32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderChunk {
    pub length: u32,
    pub chunk_type: ChunkType,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
    /// Stored as read; never verified.
    pub crc: u32,
}
impl HeaderChunk {
    pub fn color(&self) -> Option<ColorType> {
        ColorType::try_from(self.color_type).ok()
    }

    pub fn interlacing(&self) -> Option<Interlacing> {
        Interlacing::try_from(self.interlace_method).ok()
    }

    pub fn channels(&self) -> Option<u8> {
        self.color().map(|c| c.channel_count())
    }
}
impl ParseableChunk for HeaderChunk {
    const HEADER: ChunkType = ChunkType::IHDR;

    fn from_cursor(cursor: &mut ByteCursor<'_>, frame: &FrameHeader) -> Result<Self, ChunkError> {
        let (
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
            crc,
        ) = cursor.parse(
            IHDR_LENGTH as usize + 4,
            tuple((be_u32, be_u32, u8, u8, u8, u8, u8, be_u32)),
        )?;
        Ok(HeaderChunk {
            length: frame.length,
            chunk_type: frame.chunk_type,
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
            crc,
        })
    }
}

/// Decodes the IHDR chunk, which must directly follow the signature.
pub fn decode_ihdr(cursor: &mut ByteCursor<'_>) -> Result<HeaderChunk, ChunkError> {
    cursor.seek(SIGNATURE_LEN)?;
    let frame = read_frame_header(cursor)?;
    if frame.chunk_type != HeaderChunk::HEADER {
        return Err(ChunkError::UnsupportedChunk(frame.chunk_type));
    }
    if frame.length != IHDR_LENGTH {
        return Err(ChunkError::InvalidChunkLength(frame.length));
    }
    let header = HeaderChunk::from_cursor(cursor, &frame)?;
    debug!(
        "IHDR {}x{}, bit depth {}, color type {}",
        header.width, header.height, header.bit_depth, header.color_type
    );
    Ok(header)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(i),
        }
    }
}
impl ColorType {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlacing {
    None,
    Adam7,
}
impl TryFrom<u8> for Interlacing {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            i => Err(i),
        }
    }
}
