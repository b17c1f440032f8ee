use anyhow::Context;
use png_frames::{decode_image, probe};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let mut args = std::env::args().skip(1);
    let input_dir = PathBuf::from(args.next().context("Usage: frame-report DIR [OUT]")?);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("frame_report.json"));

    let mut images: Vec<_> = fs::read_dir(&input_dir)
        .with_context(|| format!("Failed to read {} folder", input_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension() == Some(OsStr::new("png")))
        .collect();
    images.sort();

    let mut entries = Vec::with_capacity(images.len());
    for image_path in &images {
        entries.push(report_entry(image_path));
    }

    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let results = serde_json::json!({
        "date": now,
        "directory": input_dir.display().to_string(),
        "images": entries,
    });
    fs::write(&output, results.to_string())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("wrote {} entries to {}", images.len(), output.display());
    Ok(())
}

fn report_entry(path: &Path) -> serde_json::Value {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    match probe(path) {
        Ok(true) => (),
        Ok(false) => return serde_json::json!({ "file": name, "error": "not a PNG image" }),
        Err(e) => return serde_json::json!({ "file": name, "error": e.to_string() }),
    }
    match decode_image(path) {
        Ok(image) => serde_json::json!({
            "file": name,
            "width": image.header.width,
            "height": image.header.height,
            "bit_depth": image.header.bit_depth,
            "color_type": image.header.color_type,
            "frames": image.frames.len(),
            "compressed_bytes": image.frames.compressed_len(),
            "size_bytes": image.size_bytes,
        }),
        Err(e) => {
            let error = match e.cause() {
                Some(cause) => format!("{e}: {cause}"),
                None => e.to_string(),
            };
            log::warn!("{name}: {error}");
            serde_json::json!({ "file": name, "error": error })
        }
    }
}
