//! Built-in AsciiMath formula engine.

mod latex;
mod layout;
mod parser;
mod symbols;

pub use self::latex::to_latex;
pub use self::layout::{layout, FormulaImage, LayoutBox};
pub use self::parser::{parse_formula, Node};
pub use self::symbols::{Symbol, SymbolKind};

use crate::color::{Color, BLACK, WHITE};
use crate::compositor::{Compositor, ImageBuilder};
use crate::config::RenderConfig;
use crate::drawing::Drawable;
use crate::engine::FormulaEngine;
use crate::error::{ParseError, RenderError};
use crate::format::{FileFormat, ImageDimensions};
use crate::raster::RasterImage;

/// An AsciiMath formula, parsed and laid out once and rendered on demand.
#[derive(Debug, Clone)]
pub struct AsciiMath {
    source: String,
    nodes: Vec<Node>,
    latex: String,
    layout: LayoutBox,
    builder: ImageBuilder,
}

impl AsciiMath {
    /// Parse `source` with the default configuration.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_builder(source, ImageBuilder::default())
    }

    pub fn with_config(source: &str, config: RenderConfig) -> Result<Self, ParseError> {
        Self::with_builder(source, ImageBuilder::new(config))
    }

    /// Parse `source`, encoding through `builder` and laying out with its configuration.
    pub fn with_builder(source: &str, builder: ImageBuilder) -> Result<Self, ParseError> {
        let nodes = parse_formula(source)?;
        let latex = to_latex(&nodes);
        let layout = layout(&nodes, builder.config());
        log::debug!("Parsed AsciiMath {:?} as LaTeX {:?}", source, latex);

        Ok(Self {
            source: source.to_string(),
            nodes,
            latex,
            layout,
            builder,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn layout(&self) -> &LayoutBox {
        &self.layout
    }

    fn image(&self, foreground: Color, background: Color) -> FormulaImage<'_> {
        FormulaImage {
            layout: &self.layout,
            foreground,
            background,
        }
    }

    /// Refuse sizes no one should allocate.
    fn check_size(&self) -> Result<(), RenderError> {
        let dim = self.dimension();
        let limit = self.builder.config().max_dimension;
        if dim.width > limit || dim.height > limit {
            return Err(RenderError::TooLarge {
                width: dim.width,
                height: dim.height,
                limit,
            });
        }
        Ok(())
    }
}

impl FormulaEngine for AsciiMath {
    fn render_svg(&self, foreground: Color, background: Color) -> Result<String, RenderError> {
        self.check_size()?;
        let mut out = Vec::new();
        self.builder
            .write_image(&self.image(foreground, background), FileFormat::Svg, &mut out)?;
        String::from_utf8(out).map_err(|e| RenderError::Math(e.to_string()))
    }

    fn render_raster(
        &self,
        foreground: Color,
        background: Color,
    ) -> Result<RasterImage, RenderError> {
        self.check_size()?;
        let drawing = self
            .image(foreground, background)
            .draw(self.builder.config());
        Ok(self.builder.rasterize(&drawing)?)
    }

    fn dimension(&self) -> ImageDimensions {
        let drawing = self.image(BLACK, WHITE).draw(self.builder.config());
        self.builder.dimensions(&drawing)
    }

    fn latex(&self) -> Option<String> {
        Some(self.latex.clone())
    }
}
