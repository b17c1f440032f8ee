use thiserror::Error;

use crate::chunks::ChunkType;

/// Failures raised by [`ByteCursor`](crate::ByteCursor) reads and seeks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("needed {requested}B at offset {offset} but only {available}B remain")]
    Truncated {
        offset: usize,
        requested: usize,
        available: usize,
    },
    #[error("offset {offset} is past the end of the {size}B source")]
    OutOfRange { offset: usize, size: usize },
}

/// Failures local to one decode stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("chunk type '{0}' not supported")]
    UnsupportedChunk(ChunkType),
    #[error("invalid chunk length of {0}B")]
    InvalidChunkLength(u32),
    #[error("stream ended before an IEND chunk")]
    UnexpectedEndOfStream,
}

/// Failures surfaced by the top-level decode entry points.
///
/// Every stage failure is tagged with the stage that produced it; the
/// stage-local cause is kept as the error source.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read image source")]
    Io(#[from] std::io::Error),
    #[error("file size of {0}B not sufficient for a PNG signature")]
    TooSmall(usize),
    #[error("failed to parse image header")]
    HeaderReadFailed(#[source] ChunkError),
    #[error("failed to parse image chunk")]
    ChunkReadFailed(#[source] ChunkError),
    #[error("failed to parse image data")]
    DataReadFailed(#[source] ChunkError),
}
impl DecodeError {
    /// The stage-local error behind a stage failure.
    pub fn cause(&self) -> Option<&ChunkError> {
        match self {
            Self::HeaderReadFailed(e) | Self::ChunkReadFailed(e) | Self::DataReadFailed(e) => {
                Some(e)
            }
            Self::Io(_) | Self::TooSmall(_) => None,
        }
    }
}
