//! Lossless raster output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use funheat_common::error::FunheatResult;

/// Encode an RGBA raster as PNG into `writer`.
pub fn encode_png<W: Write>(image: &RgbaImage, writer: W) -> FunheatResult<()> {
    PngEncoder::new(writer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Write an RGBA raster as a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> FunheatResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    encode_png(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Destination for finished heatmaps.
pub trait HeatmapSink {
    /// Persist the raster. The sink does not keep the image.
    fn write(&mut self, image: &RgbaImage) -> FunheatResult<()>;

    /// Human-readable destination, used in logs.
    fn describe(&self) -> String;
}

/// Writes PNG files to a fixed path.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    path: PathBuf,
}

impl PngFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeatmapSink for PngFileSink {
    fn write(&mut self, image: &RgbaImage) -> FunheatResult<()> {
        save_png(image, &self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Collects PNG bytes in memory.
#[derive(Debug, Clone, Default)]
pub struct PngBufferSink {
    pub bytes: Vec<u8>,
}

impl HeatmapSink for PngBufferSink {
    fn write(&mut self, image: &RgbaImage) -> FunheatResult<()> {
        self.bytes.clear();
        encode_png(image, &mut self.bytes)
    }

    fn describe(&self) -> String {
        format!("memory buffer ({} bytes)", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_buffer_sink_writes_png_signature() {
        let mut image = RgbaImage::new(4, 2);
        image.put_pixel(1, 1, Rgba([10, 20, 30, 255]));

        let mut sink = PngBufferSink::default();
        sink.write(&image).unwrap();
        assert_eq!(&sink.bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&sink.bytes).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }
}
