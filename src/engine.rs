//! The formula engine seam.

use crate::color::Color;
use crate::error::RenderError;
use crate::format::ImageDimensions;
use crate::raster::RasterImage;

/// A renderer built from one formula source.
///
/// Construction is the engine's own business (it usually parses the source and fails with a
/// [`ParseError`](crate::ParseError)); once built, an engine can render the formula any number of
/// times.
pub trait FormulaEngine {
    /// Render the formula as SVG markup.
    fn render_svg(&self, foreground: Color, background: Color) -> Result<String, RenderError>;

    /// Render the formula into a pixel buffer.
    fn render_raster(
        &self,
        foreground: Color,
        background: Color,
    ) -> Result<RasterImage, RenderError>;

    /// Pixel size of the rendered formula.
    fn dimension(&self) -> ImageDimensions;

    /// LaTeX equivalent of the formula, for diagnostics.
    fn latex(&self) -> Option<String> {
        None
    }
}
