mod chunks;
mod cursor;
mod decoder;
mod error;
mod png;
mod signature;
#[cfg(test)]
mod testing;
mod utils;

pub use chunks::{
    idat::{collect_frames, DataFrame, DataFrameSequence},
    ihdr::{decode_ihdr, ColorType, HeaderChunk, Interlacing},
    read_frame_header, ChunkType, FrameHeader,
};
pub use cursor::ByteCursor;
pub use decoder::{DecodeOptions, Decoder, Headed, Signed, Start};
pub use error::{ChunkError, CursorError, DecodeError};
pub use png::{
    decode_bytes, decode_bytes_with, decode_image, decode_image_with, probe, probe_bytes,
    ParsedImage,
};
pub use signature::{read_signature, Signature};
