//! Output formats and image dimensions.

use std::fmt;

/// Output format requested from a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileFormat {
    /// Portable Network Graphics raster.
    #[default]
    Png,
    /// Scalable Vector Graphics markup.
    Svg,
    /// Encapsulated PostScript.
    Eps,
    /// Portable Document Format.
    Pdf,
    /// Plain ASCII text.
    Txt,
    /// Unicode text art.
    Utxt,
}

impl FileFormat {
    /// Look up a format by file extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "eps" => Some(Self::Eps),
            "pdf" => Some(Self::Pdf),
            "txt" | "atxt" => Some(Self::Txt),
            "utxt" => Some(Self::Utxt),
            _ => None,
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Eps => "eps",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
            Self::Utxt => "utxt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Eps => "application/postscript",
            Self::Pdf => "application/pdf",
            Self::Txt | Self::Utxt => "text/plain",
        }
    }

    /// Whether formulas can be exported in this format.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Png | Self::Svg)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

/// Pixel size of a produced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Round a fractional size up to whole pixels after scaling.
    ///
    /// Both sides are at least one pixel so every image stays drawable.
    pub fn from_size(width: f32, height: f32, scale: f32) -> Self {
        let to_px = |v: f32| ((v * scale).ceil().max(1.0)) as u32;
        Self {
            width: to_px(width),
            height: to_px(height),
        }
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileFormat::from_extension("PNG"), Some(FileFormat::Png));
        assert_eq!(FileFormat::from_extension(".svg"), Some(FileFormat::Svg));
        assert_eq!(FileFormat::from_extension("docx"), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(FileFormat::Png.mime_type(), "image/png");
        assert_eq!(FileFormat::Svg.mime_type(), "image/svg+xml");
        assert_eq!(FileFormat::Utxt.mime_type(), "text/plain");
        assert_eq!(FileFormat::Svg.to_string(), "SVG");
    }

    #[test]
    fn test_supported_formats() {
        assert!(FileFormat::Png.is_supported());
        assert!(FileFormat::Svg.is_supported());
        assert!(!FileFormat::Eps.is_supported());
        assert!(!FileFormat::Utxt.is_supported());
    }

    #[test]
    fn test_dimensions_round_up() {
        let dim = ImageDimensions::from_size(10.2, 0.0, 2.0);
        assert_eq!(dim, ImageDimensions::new(21, 1));
        assert_eq!(dim.to_string(), "21x1");
    }
}
