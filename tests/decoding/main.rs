use std::path::PathBuf;

use png_frames::{
    decode_image, decode_image_with, probe, ChunkError, ChunkType, DecodeError, DecodeOptions,
};

const SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

fn chunk(bytes: &mut Vec<u8>, length: u32, tag: &[u8; 4], body: &[u8]) {
    bytes.extend(length.to_be_bytes());
    bytes.extend(tag);
    bytes.extend(body);
}

fn ihdr(bytes: &mut Vec<u8>, width: u32, height: u32) {
    let mut body = vec![];
    body.extend(width.to_be_bytes());
    body.extend(height.to_be_bytes());
    body.extend([8, 2, 0, 0, 0, 0x11, 0x22, 0x33, 0x44]);
    chunk(bytes, 13, b"IHDR", &body);
}

fn idat(bytes: &mut Vec<u8>, payload: &[u8]) {
    let mut body = vec![0x78, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
    body.extend([0xca, 0xfe, 0xba, 0xbe]);
    body.extend(payload);
    chunk(bytes, payload.len() as u32 + 12, b"IDAT", &body);
}

fn iend(bytes: &mut Vec<u8>) {
    chunk(bytes, 0, b"IEND", &[0xae, 0x42, 0x60, 0x82]);
}

fn two_frame_image(with_iend: bool) -> Vec<u8> {
    let mut bytes = SIGNATURE.to_vec();
    ihdr(&mut bytes, 100, 50);
    idat(&mut bytes, &[0xaa; 20]);
    idat(&mut bytes, &[0xbb; 5]);
    if with_iend {
        iend(&mut bytes);
    }
    bytes
}

fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn decodes_two_frames_from_a_file() {
    let path = write_fixture("two_frames.png", &two_frame_image(true));
    assert!(probe(&path).unwrap());
    let image = decode_image(&path).unwrap();
    assert_eq!((image.header.width, image.header.height), (100, 50));
    let sizes: Vec<_> = image.frames.iter().map(|f| f.payload().len()).collect();
    assert_eq!(sizes, [20, 5]);
    assert!(image.frames[0].payload().iter().all(|&b| b == 0xaa));
    assert!(image.frames[1].payload().iter().all(|&b| b == 0xbb));
    insta::assert_snapshot!(image.to_string(), @"100x50, bit depth 8, color type 2, 2 IDAT frame(s), 25 compressed bytes, 118 bytes total");
}

#[test]
fn tiny_files_are_too_small() {
    for len in 0..8 {
        let path = write_fixture(&format!("tiny_{len}.png"), &SIGNATURE[..len]);
        assert!(matches!(decode_image(&path), Err(DecodeError::TooSmall(n)) if n == len));
        assert!(!probe(&path).unwrap());
    }
}

#[test]
fn probe_rejects_other_formats() {
    let mut bytes = two_frame_image(true);
    bytes[1..4].copy_from_slice(b"JPG");
    let path = write_fixture("jpg_tag.png", &bytes);
    assert!(!probe(&path).unwrap());
}

#[test]
fn probe_of_missing_file_is_an_io_error() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("does_not_exist.png");
    assert!(probe(&path).is_err());
    assert!(matches!(decode_image(&path), Err(DecodeError::Io(_))));
}

#[test]
fn first_chunk_must_be_ihdr() {
    let mut bytes = SIGNATURE.to_vec();
    chunk(&mut bytes, 13, b"IHDX", &[0; 17]);
    iend(&mut bytes);
    let path = write_fixture("not_ihdr.png", &bytes);
    let err = decode_image(&path).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::ChunkReadFailed(ChunkError::UnsupportedChunk(ChunkType(t))) if &t == b"IHDX"
    ));
    let message = format!("{err}: {}", err.cause().unwrap());
    insta::assert_snapshot!(message, @"failed to parse image chunk: chunk type 'IHDX' not supported");
}

#[test]
fn ihdr_length_must_be_13() {
    for length in [12, 14] {
        let mut bytes = SIGNATURE.to_vec();
        chunk(&mut bytes, length, b"IHDR", &[0; 17]);
        iend(&mut bytes);
        let path = write_fixture(&format!("ihdr_len_{length}.png"), &bytes);
        assert!(matches!(
            decode_image(&path),
            Err(DecodeError::ChunkReadFailed(ChunkError::InvalidChunkLength(n))) if n == length
        ));
    }
}

#[test]
fn missing_iend_is_unexpected_end_of_stream() {
    let path = write_fixture("no_iend.png", &two_frame_image(false));
    let err = decode_image(&path).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::DataReadFailed(ChunkError::UnexpectedEndOfStream)
    ));
    let message = format!("{err}: {}", err.cause().unwrap());
    insta::assert_snapshot!(message, @"failed to parse image data: stream ended before an IEND chunk");
}

#[test]
fn missing_iend_is_accepted_when_lenient() {
    let path = write_fixture("no_iend_lenient.png", &two_frame_image(false));
    let options = DecodeOptions {
        require_iend: false,
    };
    let image = decode_image_with(&path, options).unwrap();
    assert_eq!(image.frames.len(), 2);
}

#[test]
fn release_can_be_called_twice() {
    let path = write_fixture("release.png", &two_frame_image(true));
    let mut image = decode_image(&path).unwrap();
    image.release();
    image.release();
    assert!(image.is_released());
    assert!(image.frames.iter().all(|f| f.payload().is_empty()));
    assert_eq!(image.frames.len(), 2);
}
