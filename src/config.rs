//! Rendering configuration.

use crate::error::{ParseError, Result};
use serde::Deserialize;

/// Settings shared by the formula engine and the compositor.
///
/// Every field has a default, so a TOML document only needs to name the
/// values it overrides:
///
/// ```text
/// font_size = 24.0
/// scale = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base font size of typeset formulas, in user units.
    pub font_size: f32,
    /// Font family of typeset formulas.
    pub font_family: String,
    /// Font size of the plain-text rollback image.
    pub rollback_font_size: f32,
    /// Font family of the plain-text rollback image.
    pub monospace_family: String,
    /// Blank space around the drawing, in user units.
    pub margin: f32,
    /// Multiplier from user units to output pixels.
    pub scale: f32,
    /// Largest width or height, in pixels, an engine agrees to render.
    pub max_dimension: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            font_family: "serif".to_string(),
            rollback_font_size: 14.0,
            monospace_family: "monospace".to_string(),
            margin: 4.0,
            scale: 1.0,
            max_dimension: 16384,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(input)
            .map_err(|e| ParseError::Config(format!("Invalid TOML: {}", e)))?;

        if !is_positive(config.scale) {
            let message = format!("scale must be positive, got {}", config.scale);
            return Err(ParseError::Config(message).into());
        }
        if !is_positive(config.font_size) || !is_positive(config.rollback_font_size) {
            return Err(ParseError::Config("font sizes must be positive".into()).into());
        }

        Ok(config)
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RenderConfig::from_toml("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            RenderConfig::from_toml("scale = 2.0\nfont_family = \"Latin Modern Math\"").unwrap();
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.font_family, "Latin Modern Math");
        assert_eq!(config.margin, RenderConfig::default().margin);
    }

    #[test]
    fn test_invalid_values() {
        let err = RenderConfig::from_toml("scale = 0.0").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Config(_))));

        let err = RenderConfig::from_toml("scale = \"big\"").unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
    }
}
