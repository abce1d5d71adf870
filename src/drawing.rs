//! Resolution-independent drawings handed to a compositor.
//!
//! A [`Drawing`] is a flat list of positioned [`Elem`]s on a solid background. Coordinates are in
//! user units with the origin at the top-left corner and `y` growing downwards; text is positioned
//! by its baseline.

use crate::color::{Color, BLACK, WHITE};
use crate::config::RenderConfig;
use crate::format::ImageDimensions;

/// Average advance of a monospaced glyph, relative to the font size.
pub const MONOSPACE_ADVANCE: f32 = 0.6;
/// Height above the baseline, relative to the font size.
pub const ASCENT: f32 = 0.8;
/// Depth below the baseline, relative to the font size.
pub const DESCENT: f32 = 0.25;

/// A single primitive in a [`Drawing`].
#[derive(Debug, Clone, PartialEq)]
pub enum Elem {
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        font_family: String,
        italic: bool,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
    Polyline {
        points: Vec<(f32, f32)>,
        width: f32,
        color: Color,
    },
}

impl Elem {
    /// Shift the element by `(dx, dy)`.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Elem::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Elem::Line { from, to, .. } => {
                *from = (from.0 + dx, from.1 + dy);
                *to = (to.0 + dx, to.1 + dy);
            }
            Elem::Polyline { points, .. } => {
                for p in points.iter_mut() {
                    *p = (p.0 + dx, p.1 + dy);
                }
            }
        }
    }

    /// Repaint the element with `color`.
    pub fn set_color(&mut self, new_color: Color) {
        match self {
            Elem::Text { color, .. } | Elem::Line { color, .. } | Elem::Polyline { color, .. } => {
                *color = new_color
            }
        }
    }
}

/// Everything a compositor needs to produce an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub elems: Vec<Elem>,
}

impl Drawing {
    /// Pixel size of this drawing once scaled.
    pub fn dimensions(&self, scale: f32) -> ImageDimensions {
        ImageDimensions::from_size(self.width, self.height, scale)
    }
}

/// Anything that can lay itself out as a [`Drawing`].
pub trait Drawable {
    fn draw(&self, config: &RenderConfig) -> Drawing;
}

/// Lines of plain text stacked top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    lines: Vec<String>,
    monospaced: bool,
    foreground: Color,
    background: Color,
}

impl TextBlock {
    pub fn new(lines: Vec<String>, foreground: Color, background: Color) -> Self {
        Self {
            lines,
            monospaced: false,
            foreground,
            background,
        }
    }

    /// The plain black-on-white monospaced block used when typesetting is impossible.
    pub fn black_on_white_monospaced<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            monospaced: true,
            foreground: BLACK,
            background: WHITE,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_monospaced(&self) -> bool {
        self.monospaced
    }
}

impl Drawable for TextBlock {
    fn draw(&self, config: &RenderConfig) -> Drawing {
        let (font_size, font_family) = if self.monospaced {
            (config.rollback_font_size, &config.monospace_family)
        } else {
            (config.font_size, &config.font_family)
        };
        let line_height = font_size * (ASCENT + DESCENT);
        let longest = self
            .lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let elems = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| Elem::Text {
                x: config.margin,
                y: config.margin + font_size * ASCENT + i as f32 * line_height,
                text: line.clone(),
                font_size,
                font_family: font_family.clone(),
                italic: false,
                color: self.foreground,
            })
            .collect();

        Drawing {
            width: longest as f32 * font_size * MONOSPACE_ADVANCE + 2.0 * config.margin,
            height: self.lines.len().max(1) as f32 * line_height + 2.0 * config.margin,
            background: self.background,
            elems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_block_style() {
        let block = TextBlock::black_on_white_monospaced(["x^^^"]);
        assert!(block.is_monospaced());
        assert_eq!(block.lines().to_vec(), vec!["x^^^".to_string()]);

        let config = RenderConfig::default();
        let drawing = block.draw(&config);
        assert_eq!(drawing.background, WHITE);
        match &drawing.elems[0] {
            Elem::Text {
                text,
                font_family,
                color,
                ..
            } => {
                assert_eq!(text, "x^^^");
                assert_eq!(font_family, "monospace");
                assert_eq!(*color, BLACK);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_width_follows_longest_line() {
        let config = RenderConfig {
            margin: 0.0,
            rollback_font_size: 10.0,
            ..RenderConfig::default()
        };
        let drawing = TextBlock::black_on_white_monospaced(["ab", "abcd"]).draw(&config);
        assert!((drawing.width - 24.0).abs() < 1e-4);
        assert!((drawing.height - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_plain_block_uses_formula_font() {
        let config = RenderConfig::default();
        let red = Color::new(255, 0, 0);
        let drawing = TextBlock::new(vec!["a".into()], red, BLACK).draw(&config);
        assert_eq!(drawing.background, BLACK);
        assert!(matches!(
            &drawing.elems[0],
            Elem::Text { font_family, color, .. } if font_family == "serif" && *color == red
        ));
    }

    #[test]
    fn test_translate() {
        let mut elem = Elem::Line {
            from: (0.0, 0.0),
            to: (1.0, 1.0),
            width: 1.0,
            color: BLACK,
        };
        elem.translate(2.0, 3.0);
        assert_eq!(
            elem,
            Elem::Line {
                from: (2.0, 3.0),
                to: (3.0, 4.0),
                width: 1.0,
                color: BLACK
            }
        );
    }
}
