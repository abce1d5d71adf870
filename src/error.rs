//! Error types for the mathsafe library.

use crate::format::FileFormat;
use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while parsing a formula or a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Errors raised by a formula engine while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Formula engine unavailable: {0}")]
    Unavailable(String),

    #[error("Image of {width}x{height} exceeds the {limit}px limit")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Math rendering error: {0}")]
    Math(String),
}

/// Errors raised by a compositor while turning a drawing into bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(FileFormat),

    #[error("Invalid SVG: {0}")]
    Svg(String),

    #[error("Cannot allocate a {width}x{height} raster")]
    Allocation { width: u32, height: u32 },

    #[error("PNG codec error: {0}")]
    Png(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
