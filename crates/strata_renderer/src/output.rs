//! Writing rendered frames to disk.
//!
//! PPM (binary P6) is written directly; PNG goes through the `image` crate.
//! The format is chosen from the file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::Framebuffer;

/// Errors that can occur while saving a frame.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Framebuffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl ImageFormat {
    /// Pick a format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        Self::from_extension(&ext)
    }

    /// Parse an extension such as `"ppm"` or `"png"`.
    pub fn from_extension(ext: &str) -> Result<Self, OutputError> {
        match ext.to_ascii_lowercase().as_str() {
            "ppm" => Ok(ImageFormat::Ppm),
            "png" => Ok(ImageFormat::Png),
            other => Err(OutputError::UnsupportedFormat(other.to_string())),
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Ppm => "ppm",
            ImageFormat::Png => "png",
        }
    }
}

fn check_size(frame: &Framebuffer) -> Result<(), OutputError> {
    let expected = frame.width as usize * frame.height as usize * Framebuffer::CHANNELS;
    if frame.data.len() != expected {
        return Err(OutputError::BufferSize {
            expected,
            actual: frame.data.len(),
        });
    }
    Ok(())
}

/// Write a binary PPM: `P6`, `width height`, `255`, then raw RGB rows.
pub fn write_ppm<W: Write>(frame: &Framebuffer, mut writer: W) -> Result<(), OutputError> {
    check_size(frame)?;

    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", frame.width, frame.height)?;
    writeln!(writer, "255")?;
    writer.write_all(&frame.data)?;
    writer.flush()?;

    Ok(())
}

/// Save a frame, choosing the format from the extension of `path`.
pub fn save<P: AsRef<Path>>(frame: &Framebuffer, path: P) -> Result<ImageFormat, OutputError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    check_size(frame)?;

    match format {
        ImageFormat::Ppm => {
            let file = File::create(path)?;
            write_ppm(frame, BufWriter::new(file))?;
        }
        ImageFormat::Png => {
            image::save_buffer_with_format(
                path,
                &frame.data,
                frame.width,
                frame.height,
                image::ColorType::Rgb8,
                image::ImageFormat::Png,
            )?;
        }
    }

    log::debug!("Saved {}x{} frame to {}", frame.width, frame.height, path.display());
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_frame() -> Framebuffer {
        let mut frame = Framebuffer::new(2, 1);
        frame.data.copy_from_slice(&[255, 0, 0, 0, 128, 255]);
        frame
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("strata_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_ppm_layout() {
        let mut bytes = Vec::new();
        write_ppm(&sample_frame(), &mut bytes).unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[255, 0, 0, 0, 128, 255]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_write_ppm_rejects_short_buffer() {
        let mut frame = sample_frame();
        frame.data.pop();

        let err = write_ppm(&frame, Vec::new()).unwrap_err();
        assert!(matches!(err, OutputError::BufferSize { expected: 6, actual: 5 }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("a/frame0001.ppm")).unwrap(), ImageFormat::Ppm);
        assert_eq!(ImageFormat::from_path(Path::new("shot.PNG")).unwrap(), ImageFormat::Png);
        assert!(matches!(
            ImageFormat::from_path(Path::new("shot.bmp")),
            Err(OutputError::UnsupportedFormat(ext)) if ext == "bmp"
        ));
        assert!(ImageFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_save_ppm_roundtrip() {
        let path = temp_path("roundtrip.ppm");
        let format = save(&sample_frame(), &path).unwrap();
        assert_eq!(format, ImageFormat::Ppm);

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(bytes.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(&bytes[bytes.len() - 6..], &[255u8, 0, 0, 0, 128, 255]);
    }

    #[test]
    fn test_save_png() {
        let path = temp_path("frame.png");
        save(&sample_frame(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(1, 0).0, [0, 128, 255]);
    }
}
