use std::{fmt, fs::File, io::Read, path::Path};

use log::{debug, info};

use crate::{
    chunks::{idat::DataFrameSequence, ihdr::HeaderChunk},
    cursor::ByteCursor,
    decoder::{DecodeOptions, Decoder},
    error::DecodeError,
    signature::{read_signature, Signature, SIGNATURE_LEN},
};

/// The framing of a decoded PNG: signature, header and IDAT frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    pub signature: Signature,
    pub header: HeaderChunk,
    pub frames: DataFrameSequence,
    /// Size of the whole source in bytes.
    pub size_bytes: usize,
}
impl ParsedImage {
    /// Frees every IDAT payload buffer. Safe to call more than once; the
    /// buffers are also freed when the image is dropped.
    pub fn release(&mut self) {
        self.frames.release();
    }

    pub fn is_released(&self) -> bool {
        self.frames.iter().all(|f| f.is_released())
    }
}
impl fmt::Display for ParsedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}, bit depth {}, color type {}, {} IDAT frame(s), {} compressed bytes, {} bytes total",
            self.header.width,
            self.header.height,
            self.header.bit_depth,
            self.header.color_type,
            self.frames.len(),
            self.frames.compressed_len(),
            self.size_bytes,
        )
    }
}

pub fn decode_image(path: impl AsRef<Path>) -> Result<ParsedImage, DecodeError> {
    decode_image_with(path, DecodeOptions::default())
}

pub fn decode_image_with(
    path: impl AsRef<Path>,
    options: DecodeOptions,
) -> Result<ParsedImage, DecodeError> {
    let path = path.as_ref();
    debug!("decoding {}", path.display());
    let bytes = std::fs::read(path)?;
    decode_bytes_with(&bytes, options)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<ParsedImage, DecodeError> {
    decode_bytes_with(bytes, DecodeOptions::default())
}

pub fn decode_bytes_with(bytes: &[u8], options: DecodeOptions) -> Result<ParsedImage, DecodeError> {
    let decoder = Decoder::new(bytes, options)?;
    let (decoder, signature) = decoder.read_signature()?;
    let (decoder, header) = decoder.decode_ihdr()?;
    let frames = decoder.collect_frames()?;
    let image = ParsedImage {
        signature,
        header,
        frames,
        size_bytes: bytes.len(),
    };
    info!("decoded {image}");
    Ok(image)
}

/// Cheap format check: reads only the signature and compares its tag to
/// `PNG`. No other signature byte is looked at.
pub fn probe(path: impl AsRef<Path>) -> std::io::Result<bool> {
    let mut head = Vec::with_capacity(SIGNATURE_LEN);
    File::open(path)?
        .take(SIGNATURE_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(probe_bytes(&head))
}

pub fn probe_bytes(bytes: &[u8]) -> bool {
    read_signature(&mut ByteCursor::new(bytes))
        .map(|signature| signature.is_png())
        .unwrap_or(false)
}
