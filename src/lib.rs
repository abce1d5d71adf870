//! # mathsafe
//!
//! Render AsciiMath formulas to SVG or PNG without ever failing on a bad formula.
//!
//! A formula that cannot be parsed or typeset is drawn as its own source text, monospaced and
//! black on white, so callers always get an image back.
//!
//! ## Quick Start
//!
//! ```rust
//! use mathsafe::{color, FileFormat, SafeFormulaRenderer};
//!
//! let renderer = SafeFormulaRenderer::new("x^2+y^2=z^2");
//!
//! let mut svg = Vec::new();
//! let dim = renderer
//!     .export(&mut svg, FileFormat::Svg, color::BLACK, color::WHITE)
//!     .unwrap()
//!     .unwrap();
//! assert!(dim.width > 0);
//! ```
//!
//! ## Supported AsciiMath
//!
//! - Scripts: `x^2`, `a_i`, `a_(i+1)^2`
//! - Fractions: `a/b`, `(a+b)/(c-d)`
//! - Roots and bars: `sqrt x`, `bar x`
//! - Brackets: `( )`, `[ ]`, `{ }`
//! - Text: `text(if)` or `"if"`
//! - Greek letters, `sum`, `prod`, `int`, `oo`, `del`, `grad`
//! - Relations: `<=`, `>=`, `!=`, `~~`, `-=`, `->`, `=>`, `in`
//! - Operators: `+-`, `xx`, `*`, `**`, `-:`
//! - Functions: `sin`, `cos`, `tan`, `log`, `ln`, `exp`, `lim`
//!
//! ## Configuration
//!
//! [`RenderConfig`] controls fonts, margin, scale and the largest image an engine will render.
//! It can be loaded from TOML with [`RenderConfig::from_toml`].
//!
//! ## Logging
//!
//! Parse failures, render failures and rollback failures are reported through the [`log`]
//! facade; install any logger to see them.

pub mod asciimath;
pub mod color;
pub mod compositor;
pub mod config;
pub mod drawing;
pub mod engine;
pub mod error;
pub mod format;
pub mod raster;
pub mod safe;

// Convenience re-exports
pub use asciimath::AsciiMath;
pub use color::Color;
pub use compositor::{Compositor, ImageBuilder};
pub use config::RenderConfig;
pub use drawing::{Drawable, Drawing, Elem, TextBlock};
pub use engine::FormulaEngine;
pub use error::{EncodeError, Error, ParseError, RenderError, Result};
pub use format::{FileFormat, ImageDimensions};
pub use raster::RasterImage;
pub use safe::{EngineState, SafeFormulaRenderer, SvgImage};

use std::io::Write;

/// Render `source` black on white with the default configuration and write it to `sink`.
///
/// This is a convenience wrapper around [`SafeFormulaRenderer::export`].
///
/// # Example
///
/// ```rust
/// use mathsafe::FileFormat;
///
/// let mut out = Vec::new();
/// let dim = mathsafe::export("a/b", FileFormat::Png, &mut out).unwrap();
/// assert!(dim.is_some());
/// assert!(out.starts_with(b"\x89PNG"));
/// ```
pub fn export(
    source: &str,
    format: FileFormat,
    sink: &mut dyn Write,
) -> Result<Option<ImageDimensions>> {
    SafeFormulaRenderer::new(source).export(sink, format, color::BLACK, color::WHITE)
}
