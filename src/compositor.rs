//! Turning drawings into encoded SVG or PNG images.

use std::borrow::Cow;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, OnceLock};

use resvg::{tiny_skia, usvg};
use simple_xml_builder::XMLElement;

use crate::color::to_hex;
use crate::config::RenderConfig;
use crate::drawing::{Drawable, Drawing, Elem};
use crate::error::EncodeError;
use crate::format::{FileFormat, ImageDimensions};
use crate::raster::RasterImage;

/// Encodes any [`Drawable`] into image bytes.
pub trait Compositor {
    /// Draw `drawable`, encode it as `format` into `sink` and report the image size.
    fn write_image(
        &self,
        drawable: &dyn Drawable,
        format: FileFormat,
        sink: &mut dyn Write,
    ) -> Result<ImageDimensions, EncodeError>;
}

/// The default compositor: SVG markup built element by element, PNG rasterized from that markup.
#[derive(Clone)]
pub struct ImageBuilder {
    config: RenderConfig,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl fmt::Debug for ImageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuilder")
            .field("config", &self.config)
            .field("fonts", &self.fontdb.len())
            .finish()
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl ImageBuilder {
    /// Create a builder. The system fonts used for rasterizing text are scanned once per process.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            fontdb: Arc::clone(system_fonts()),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Pixel size `drawing` will have once encoded.
    pub fn dimensions(&self, drawing: &Drawing) -> ImageDimensions {
        drawing.dimensions(self.config.scale)
    }

    /// Build the SVG markup for a drawing.
    pub fn svg_string(&self, drawing: &Drawing) -> String {
        gen_svg(drawing, self.dimensions(drawing), self.config.scale).to_string()
    }

    /// Rasterize a drawing into a pixel buffer.
    pub fn rasterize(&self, drawing: &Drawing) -> Result<RasterImage, EncodeError> {
        let svg = self.svg_string(drawing);

        let mut opt = usvg::Options::default();
        opt.font_family = self.config.font_family.clone();
        opt.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| EncodeError::Svg(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(
            EncodeError::Allocation {
                width: size.width(),
                height: size.height(),
            },
        )?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(RasterImage::from_pixmap(pixmap))
    }
}

impl Compositor for ImageBuilder {
    fn write_image(
        &self,
        drawable: &dyn Drawable,
        format: FileFormat,
        sink: &mut dyn Write,
    ) -> Result<ImageDimensions, EncodeError> {
        let drawing = drawable.draw(&self.config);
        let dimensions = match format {
            FileFormat::Svg => {
                sink.write_all(self.svg_string(&drawing).as_bytes())?;
                self.dimensions(&drawing)
            }
            FileFormat::Png => {
                let image = self.rasterize(&drawing)?;
                sink.write_all(&image.to_png()?)?;
                image.dimensions()
            }
            other => return Err(EncodeError::UnsupportedFormat(other)),
        };
        log::debug!("Encoded {} image of {}", format, dimensions);
        Ok(dimensions)
    }
}

fn system_fonts() -> &'static Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        log::debug!("Loaded {} font faces for rasterization", fontdb.len());
        Arc::new(fontdb)
    })
}

/// Replace characters XML 1.0 cannot carry with U+FFFD.
///
/// Markup characters are left alone; the XML writer escapes those.
fn xml_text(text: &str) -> Cow<'_, str> {
    let legal = |c: char| match c {
        '\t' | '\n' | '\r' => true,
        '\u{fffe}' | '\u{ffff}' => false,
        c => c >= '\u{20}',
    };
    if text.chars().all(legal) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if legal(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

/// Generate the root SVG element for a drawing.
///
/// `width`/`height` carry the pixel size while the `viewBox` stays in user units, so scaling is
/// left to the SVG consumer.
fn gen_svg(drawing: &Drawing, dimensions: ImageDimensions, scale: f32) -> XMLElement {
    let mut root = XMLElement::new("svg");
    root.add_attribute("xmlns", "http://www.w3.org/2000/svg");
    root.add_attribute("width", &dimensions.width.to_string());
    root.add_attribute("height", &dimensions.height.to_string());
    root.add_attribute(
        "viewBox",
        &format!(
            "0 0 {} {}",
            dimensions.width as f32 / scale,
            dimensions.height as f32 / scale
        ),
    );

    let mut background = XMLElement::new("rect");
    background.add_attribute("width", "100%");
    background.add_attribute("height", "100%");
    background.add_attribute("fill", &to_hex(drawing.background));
    root.add_child(background);

    for elem in &drawing.elems {
        root.add_child(gen_svg_elem(elem));
    }
    root
}

/// Creates an [`XMLElement`] for a given [`Elem`]
fn gen_svg_elem(elem: &Elem) -> XMLElement {
    match elem {
        Elem::Text {
            x,
            y,
            text,
            font_size,
            font_family,
            italic,
            color,
        } => {
            let mut xml_elem = XMLElement::new("text");
            xml_elem.add_attribute("x", &x.to_string());
            xml_elem.add_attribute("y", &y.to_string());
            xml_elem.add_attribute("font-size", &font_size.to_string());
            xml_elem.add_attribute("font-family", font_family);
            if *italic {
                xml_elem.add_attribute("font-style", "italic");
            }
            xml_elem.add_attribute("fill", &to_hex(*color));
            // Keep runs of spaces in rollback text
            xml_elem.add_attribute("xml:space", "preserve");
            xml_elem.add_text(xml_text(text));
            xml_elem
        }
        Elem::Line {
            from,
            to,
            width,
            color,
        } => {
            let mut xml_elem = XMLElement::new("line");
            xml_elem.add_attribute("x1", &from.0.to_string());
            xml_elem.add_attribute("y1", &from.1.to_string());
            xml_elem.add_attribute("x2", &to.0.to_string());
            xml_elem.add_attribute("y2", &to.1.to_string());
            xml_elem.add_attribute("stroke", &to_hex(*color));
            xml_elem.add_attribute("stroke-width", &width.to_string());
            xml_elem
        }
        Elem::Polyline {
            points,
            width,
            color,
        } => {
            let coord_string = points
                .iter()
                .map(|(x, y)| format!("{},{}", x, y))
                .collect::<Vec<_>>()
                .join(" ");
            let mut xml_elem = XMLElement::new("polyline");
            xml_elem.add_attribute("points", &coord_string);
            xml_elem.add_attribute("fill", "none");
            xml_elem.add_attribute("stroke", &to_hex(*color));
            xml_elem.add_attribute("stroke-width", &width.to_string());
            xml_elem.add_attribute("stroke-linejoin", "round");
            xml_elem
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};
    use crate::drawing::TextBlock;

    #[test]
    fn test_svg_contains_text_and_size() {
        let builder = ImageBuilder::default();
        let block = TextBlock::black_on_white_monospaced(["a+b"]);
        let mut out = Vec::new();
        let dim = builder
            .write_image(&block, FileFormat::Svg, &mut out)
            .unwrap();

        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("a+b"));
        assert!(svg.contains("monospace"));
        assert!(svg.contains(&format!("width=\"{}\"", dim.width)));
        assert!(dim.width > 0 && dim.height > 0);
    }

    #[test]
    fn test_png_matches_reported_size() {
        let builder = ImageBuilder::default();
        let block = TextBlock::black_on_white_monospaced(["x^^^"]);
        let mut out = Vec::new();
        let dim = builder
            .write_image(&block, FileFormat::Png, &mut out)
            .unwrap();

        let image = RasterImage::from_png(&out).unwrap();
        assert_eq!(image.dimensions(), dim);
        assert_eq!(dim, builder.dimensions(&block.draw(builder.config())));
        assert_eq!(image.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_scale_applies_to_pixels() {
        let config = RenderConfig {
            scale: 2.0,
            ..RenderConfig::default()
        };
        let builder = ImageBuilder::new(config);
        let drawing = Drawing {
            width: 10.0,
            height: 5.0,
            background: WHITE,
            elems: vec![Elem::Line {
                from: (0.0, 2.5),
                to: (10.0, 2.5),
                width: 1.0,
                color: BLACK,
            }],
        };
        let image = builder.rasterize(&drawing).unwrap();
        assert_eq!(image.dimensions(), ImageDimensions::new(20, 10));
        assert_eq!(image.pixel(10, 5), Some(BLACK));
    }

    #[test]
    fn test_control_characters_are_replaced() {
        assert_eq!(xml_text("a<b"), "a<b");
        assert_eq!(xml_text("x\u{1}y\u{1f}"), "x\u{fffd}y\u{fffd}");
        assert_eq!(xml_text("tab\there"), "tab\there");

        let builder = ImageBuilder::default();
        let block = TextBlock::black_on_white_monospaced(["x\u{1}y"]);
        let mut out = Vec::new();
        builder
            .write_image(&block, FileFormat::Svg, &mut out)
            .unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(!svg.contains('\u{1}'));
        assert!(svg.contains("x\u{fffd}y"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let builder = ImageBuilder::default();
        let block = TextBlock::black_on_white_monospaced(["a<b & \"c"]);
        let mut out = Vec::new();
        builder
            .write_image(&block, FileFormat::Svg, &mut out)
            .unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("&lt;"));
        assert!(svg.contains("&amp;"));
        assert!(builder.rasterize(&block.draw(builder.config())).is_ok());
    }

    #[test]
    fn test_builders_share_system_fonts() {
        let a = ImageBuilder::default();
        let b = ImageBuilder::new(RenderConfig {
            scale: 3.0,
            ..RenderConfig::default()
        });
        assert!(Arc::ptr_eq(&a.fontdb, &b.fontdb));
    }

    #[test]
    fn test_unsupported_format() {
        let builder = ImageBuilder::default();
        let block = TextBlock::black_on_white_monospaced(["x"]);
        let mut out = Vec::new();
        let err = builder
            .write_image(&block, FileFormat::Eps, &mut out)
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedFormat(FileFormat::Eps)));
        assert!(out.is_empty());
    }
}
