//! Fallback-safe formula rendering.
//!
//! [`SafeFormulaRenderer`] never lets a formula engine failure reach the caller: when the engine
//! cannot be built or cannot render, the raw formula source is drawn as monospaced black-on-white
//! text instead.

use std::io::Write;

use crate::asciimath::AsciiMath;
use crate::color::Color;
use crate::compositor::{Compositor, ImageBuilder};
use crate::config::RenderConfig;
use crate::drawing::TextBlock;
use crate::engine::FormulaEngine;
use crate::error::{ParseError, RenderError, Result};
use crate::format::{FileFormat, ImageDimensions};
use crate::raster::RasterImage;

/// Outcome of building a formula engine.
#[derive(Debug)]
pub enum EngineState<E> {
    Usable(E),
    Unusable(ParseError),
}

/// SVG markup together with the size it renders at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgImage {
    pub text: String,
    pub dimensions: ImageDimensions,
}

/// Renders a formula, substituting its plain source text whenever the engine fails.
#[derive(Debug)]
pub struct SafeFormulaRenderer<E = AsciiMath, C = ImageBuilder> {
    source: String,
    engine: EngineState<E>,
    compositor: C,
}

impl SafeFormulaRenderer {
    /// Build an AsciiMath renderer with the default configuration.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, &RenderConfig::default())
    }

    pub fn with_config(source: &str, config: &RenderConfig) -> Self {
        Self::with_builder(source, &ImageBuilder::new(config.clone()))
    }

    /// Build an AsciiMath renderer on an existing builder; the engine and the rollback share it.
    ///
    /// Rendering many formulas through one builder reuses its configuration and fonts.
    pub fn with_builder(source: &str, builder: &ImageBuilder) -> Self {
        let engine = AsciiMath::with_builder(source, builder.clone());
        Self::from_parts(source, engine, builder.clone())
    }
}

impl<E: FormulaEngine, C: Compositor> SafeFormulaRenderer<E, C> {
    /// Wrap an engine construction result.
    ///
    /// A failed construction is logged and leaves the renderer in rollback-only mode.
    pub fn from_parts(
        source: impl Into<String>,
        engine: std::result::Result<E, ParseError>,
        compositor: C,
    ) -> Self {
        let source = source.into();
        let engine = match engine {
            Ok(engine) => EngineState::Usable(engine),
            Err(err) => {
                log::info!("Error parsing {}: {}", source, err);
                EngineState::Unusable(err)
            }
        };
        Self {
            source,
            engine,
            compositor,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_usable(&self) -> bool {
        matches!(self.engine, EngineState::Usable(_))
    }

    pub fn engine(&self) -> Option<&E> {
        match &self.engine {
            EngineState::Usable(engine) => Some(engine),
            EngineState::Unusable(_) => None,
        }
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.engine {
            EngineState::Usable(_) => None,
            EngineState::Unusable(err) => Some(err),
        }
    }

    /// Render as SVG, falling back to the source text.
    ///
    /// Returns `None` only when the fallback cannot be encoded either.
    pub fn svg(&self, foreground: Color, background: Color) -> Option<SvgImage> {
        let rendered = self.usable_engine().and_then(|engine| {
            let text = engine.render_svg(foreground, background)?;
            Ok(SvgImage {
                text,
                dimensions: engine.dimension(),
            })
        });

        match rendered {
            Ok(svg) => Some(svg),
            Err(err) => {
                self.trace(&err);
                self.rollback_svg()
            }
        }
    }

    /// Render into a pixel buffer, falling back to the source text.
    ///
    /// Returns `None` only when the fallback cannot be encoded either.
    pub fn image(&self, foreground: Color, background: Color) -> Option<RasterImage> {
        let rendered = self
            .usable_engine()
            .and_then(|engine| engine.render_raster(foreground, background));

        match rendered {
            Ok(image) => Some(image),
            Err(err) => {
                self.trace(&err);
                self.rollback_image()
            }
        }
    }

    /// Write the formula as `format` into `sink`.
    ///
    /// Returns `Ok(None)` without writing anything for formats other than PNG and SVG, and when
    /// nothing could be rendered at all. Errors only come from writing the finished image.
    pub fn export(
        &self,
        sink: &mut dyn Write,
        format: FileFormat,
        foreground: Color,
        background: Color,
    ) -> Result<Option<ImageDimensions>> {
        match format {
            FileFormat::Png => {
                let Some(image) = self.image(foreground, background) else {
                    return Ok(None);
                };
                sink.write_all(&image.to_png()?)?;
                Ok(Some(image.dimensions()))
            }
            FileFormat::Svg => {
                let Some(svg) = self.svg(foreground, background) else {
                    return Ok(None);
                };
                sink.write_all(svg.text.as_bytes())?;
                Ok(Some(svg.dimensions))
            }
            _ => Ok(None),
        }
    }

    fn usable_engine(&self) -> std::result::Result<&E, RenderError> {
        match &self.engine {
            EngineState::Usable(engine) => Ok(engine),
            EngineState::Unusable(err) => Err(RenderError::Unavailable(err.to_string())),
        }
    }

    fn trace(&self, err: &RenderError) {
        let latex = self.engine().and_then(|engine| engine.latex());
        match latex {
            Some(latex) => log::warn!(
                "Rendering failed, falling back to text. Form={} Latex={}: {}",
                self.source,
                latex,
                err
            ),
            None => log::warn!(
                "Rendering failed, falling back to text. Form={}: {}",
                self.source,
                err
            ),
        }
    }

    fn rollback(&self) -> TextBlock {
        TextBlock::black_on_white_monospaced([self.source.as_str()])
    }

    fn rollback_svg(&self) -> Option<SvgImage> {
        let mut out = Vec::new();
        let dimensions = match self
            .compositor
            .write_image(&self.rollback(), FileFormat::Svg, &mut out)
        {
            Ok(dimensions) => dimensions,
            Err(err) => {
                log::error!("Cannot encode text rollback for {}: {}", self.source, err);
                return None;
            }
        };
        match String::from_utf8(out) {
            Ok(text) => Some(SvgImage { text, dimensions }),
            Err(err) => {
                log::error!("Text rollback for {} is not UTF-8: {}", self.source, err);
                None
            }
        }
    }

    fn rollback_image(&self) -> Option<RasterImage> {
        let mut out = Vec::new();
        let decoded = self
            .compositor
            .write_image(&self.rollback(), FileFormat::Png, &mut out)
            .and_then(|_| RasterImage::from_png(&out));
        match decoded {
            Ok(image) => Some(image),
            Err(err) => {
                log::error!("Cannot encode text rollback for {}: {}", self.source, err);
                None
            }
        }
    }
}
