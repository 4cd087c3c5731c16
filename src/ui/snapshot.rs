use std::{fs::File, io::BufWriter, path::Path};

use image::{ColorType, ImageEncoder, codecs::png::PngEncoder};
use thiserror::Error;

use crate::ui::raster::Surface;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("surface is empty ({width}x{height})")]
    Empty { width: usize, height: usize },
    #[error("surface too large for PNG: {0}")]
    TooLarge(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Writes the surface as an 8-bit RGBA PNG.
pub fn write_png(surface: &Surface, path: &Path) -> Result<(), SnapshotError> {
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return Err(SnapshotError::Empty { width, height });
    }
    let w = u32::try_from(width).map_err(|_| SnapshotError::TooLarge(width))?;
    let h = u32::try_from(height).map_err(|_| SnapshotError::TooLarge(height))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    PngEncoder::new(writer).write_image(&surface.to_rgba_bytes(), w, h, ColorType::Rgba8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visual::Rgb;

    #[test]
    fn writes_a_png_with_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frame.png");
        let mut surface = Surface::new(8, 4);
        surface.clear(Rgb::new(10, 20, 30));
        write_png(&surface, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn empty_surface_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&Surface::new(0, 3), &dir.path().join("x.png")).unwrap_err();
        assert!(matches!(err, SnapshotError::Empty { width: 0, height: 3 }));
    }
}
