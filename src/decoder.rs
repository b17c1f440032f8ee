use std::marker::PhantomData;

use crate::{
    chunks::{
        idat::{collect_frames, DataFrameSequence},
        ihdr::{decode_ihdr, HeaderChunk},
    },
    cursor::ByteCursor,
    error::DecodeError,
    signature::{read_signature, Signature, SIGNATURE_LEN},
};

/// Knobs for a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with `UnexpectedEndOfStream` when the stream runs out before IEND.
    /// When unset, the frames read so far are returned instead.
    pub require_iend: bool,
}
impl Default for DecodeOptions {
    fn default() -> Self {
        Self { require_iend: true }
    }
}

/// Stage-by-stage decoder. Each stage consumes the decoder and hands back the
/// next one, so frames can only be collected once the header is decoded.
pub struct Decoder<'a, State> {
    cursor: ByteCursor<'a>,
    options: DecodeOptions,
    state: PhantomData<State>,
}

pub struct Start;
pub struct Signed;
pub struct Headed;

impl<'a> Decoder<'a, Start> {
    pub fn new(data: &'a [u8], options: DecodeOptions) -> Result<Self, DecodeError> {
        if data.len() < SIGNATURE_LEN {
            return Err(DecodeError::TooSmall(data.len()));
        }
        Ok(Self {
            cursor: ByteCursor::new(data),
            options,
            state: PhantomData,
        })
    }

    pub fn read_signature(mut self) -> Result<(Decoder<'a, Signed>, Signature), DecodeError> {
        let signature = read_signature(&mut self.cursor)
            .map_err(|e| DecodeError::HeaderReadFailed(e.into()))?;
        Ok((self.advance(), signature))
    }
}

impl<'a> Decoder<'a, Signed> {
    pub fn decode_ihdr(mut self) -> Result<(Decoder<'a, Headed>, HeaderChunk), DecodeError> {
        let header = decode_ihdr(&mut self.cursor).map_err(DecodeError::ChunkReadFailed)?;
        Ok((self.advance(), header))
    }
}

impl<'a> Decoder<'a, Headed> {
    pub fn collect_frames(mut self) -> Result<DataFrameSequence, DecodeError> {
        collect_frames(&mut self.cursor, &self.options).map_err(DecodeError::DataReadFailed)
    }
}

impl<'a, S> Decoder<'a, S> {
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn advance<T>(self) -> Decoder<'a, T> {
        Decoder {
            cursor: self.cursor,
            options: self.options,
            state: PhantomData,
        }
    }
}
