//! Decoded raster images.

use crate::color::Color;
use crate::error::EncodeError;
use crate::format::ImageDimensions;
use resvg::tiny_skia::Pixmap;

/// An RGBA pixel buffer produced by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixmap: Pixmap,
}

impl RasterImage {
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// Decode PNG bytes.
    pub fn from_png(data: &[u8]) -> Result<Self, EncodeError> {
        Pixmap::decode_png(data)
            .map(Self::from_pixmap)
            .map_err(|e| EncodeError::Png(e.to_string()))
    }

    /// Encode the image as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        self.pixmap
            .encode_png()
            .map_err(|e| EncodeError::Png(e.to_string()))
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width(), self.height())
    }

    /// Color of the pixel at `(x, y)`, ignoring alpha.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::new(c.red(), c.green(), c.blue()))
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia;

    #[test]
    fn test_png_round_trip_keeps_size() {
        let mut pixmap = Pixmap::new(7, 3).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(10, 20, 30, 255));
        let image = RasterImage::from_pixmap(pixmap);

        let png = image.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = RasterImage::from_png(&png).unwrap();
        assert_eq!(decoded.dimensions(), ImageDimensions::new(7, 3));
        assert_eq!(decoded.pixel(6, 2), Some(Color::new(10, 20, 30)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            RasterImage::from_png(b"not a png"),
            Err(EncodeError::Png(_))
        ));
    }
}
