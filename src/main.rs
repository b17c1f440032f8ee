use std::path::PathBuf;

use anyhow::{bail, Context};
use png_frames::{decode_image_with, probe, DecodeOptions, ParsedImage};

const USAGE: &str = "\
USAGE:
  png-frames [OPTIONS] FILEPATH

DESCRIPTION
  Prints the header and IDAT framing of a PNG image.

  -v, -vv      more logging
  --lenient    accept a stream that ends without an IEND chunk
  --json       print the result as JSON
  -h, --help   print this message";

#[derive(Debug, PartialEq)]
struct Args {
    path: PathBuf,
    verbosity: log::LevelFilter,
    lenient: bool,
    json: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Args>> {
    let mut path = None;
    let mut verbosity = log::LevelFilter::Error;
    let mut lenient = false;
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-v" => verbosity = log::LevelFilter::Info,
            "-vv" => verbosity = log::LevelFilter::Debug,
            "--lenient" => lenient = true,
            "--json" => json = true,
            flag if flag.starts_with('-') => bail!("Unknown option '{flag}'\n\n{USAGE}"),
            _ => path = Some(PathBuf::from(&arg)),
        }
    }
    let Some(path) = path else {
        bail!("No image filepath was given!\n\n{USAGE}");
    };
    Ok(Some(Args {
        path,
        verbosity,
        lenient,
        json,
    }))
}

fn main() -> anyhow::Result<()> {
    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };
    pretty_env_logger::formatted_builder()
        .filter_level(args.verbosity)
        .parse_default_env()
        .init();

    if !args.path.exists() {
        bail!(
            "Please provide a valid filepath to a PNG image. '{}' does not exist!",
            args.path.display()
        );
    }
    if !probe(&args.path).context("Failed to read image signature")? {
        bail!("'{}' is not a PNG image", args.path.display());
    }

    let options = DecodeOptions {
        require_iend: !args.lenient,
    };
    let image = decode_image_with(&args.path, options)
        .with_context(|| format!("Failed to parse {}", args.path.display()))?;
    if !image.signature.is_canonical() {
        log::warn!("signature bytes {:02x?} are not canonical", image.signature.to_bytes());
    }

    if args.json {
        println!("{}", image_json(&image));
    } else {
        print_info(&image);
    }
    Ok(())
}

fn print_info(image: &ParsedImage) {
    let header = &image.header;
    println!("Image Parsed:");
    println!("  - Color type = {}", header.color_type);
    println!("  - Bit depth  = {}", header.bit_depth);
    match header.channels() {
        Some(channels) => println!("  - Channels   = {channels}"),
        None => println!("  - Channels   = unknown"),
    }
    println!("  - Height     = {}", header.height);
    println!("  - Width      = {}", header.width);
    println!("  - Interlace  = {}", header.interlace_method);
    println!("  - IDAT       = {} frame(s)", image.frames.len());
    for (i, frame) in image.frames.iter().enumerate() {
        println!("      #{i}: {} bytes", frame.payload_len());
    }
    println!("  - Compressed = {} bytes", image.frames.compressed_len());
    println!("  - File size  = {} bytes", image.size_bytes);
}

fn image_json(image: &ParsedImage) -> serde_json::Value {
    let header = &image.header;
    serde_json::json!({
        "width": header.width,
        "height": header.height,
        "bit_depth": header.bit_depth,
        "color_type": header.color_type,
        "channels": header.channels(),
        "compression_method": header.compression_method,
        "filter_method": header.filter_method,
        "interlace_method": header.interlace_method,
        "frames": image.frames.iter().map(|f| f.payload_len()).collect::<Vec<_>>(),
        "compressed_bytes": image.frames.compressed_len(),
        "size_bytes": image.size_bytes,
    })
}
