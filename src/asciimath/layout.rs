//! Box layout of parsed formulas.
//!
//! Every node becomes a [`LayoutBox`] whose origin sits on the baseline at its left edge. Boxes
//! are combined horizontally for rows and vertically for fractions, scripts and radicals. Glyph
//! advances come from fixed average metrics rather than real font tables.

use super::parser::Node;
use super::symbols::SymbolKind;
use crate::color::{Color, BLACK};
use crate::config::RenderConfig;
use crate::drawing::{Drawable, Drawing, Elem, ASCENT, DESCENT};

/// Average glyph advance, relative to the font size.
const GLYPH_ADVANCE: f32 = 0.55;
/// Advance of a bracket glyph, relative to its font size.
const BRACKET_ADVANCE: f32 = 0.35;
const SCRIPT_SCALE: f32 = 0.7;
const FRACTION_SCALE: f32 = 0.85;
const LARGE_SCALE: f32 = 1.4;
/// Height of the math axis (fraction bars) above the baseline.
const AXIS: f32 = 0.3;
const RULE: f32 = 0.06;
const GAP: f32 = 0.12;
/// Smallest font size scripts shrink to.
const MIN_FONT_SIZE: f32 = 6.0;

/// A laid-out piece of formula.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutBox {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    pub elems: Vec<Elem>,
}

impl LayoutBox {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }

    /// Place `child` with its origin at `(dx, dy)`, growing the extents to contain it.
    fn place(&mut self, child: LayoutBox, dx: f32, dy: f32) {
        self.ascent = self.ascent.max(child.ascent - dy);
        self.descent = self.descent.max(child.descent + dy);
        self.width = self.width.max(dx + child.width);
        self.elems.extend(child.elems.into_iter().map(|mut e| {
            e.translate(dx, dy);
            e
        }));
    }
}

#[derive(Debug, Clone, Copy)]
struct Style<'a> {
    family: &'a str,
    size: f32,
}

impl<'a> Style<'a> {
    fn scaled(self, factor: f32) -> Self {
        Self {
            family: self.family,
            size: (self.size * factor).max(MIN_FONT_SIZE),
        }
    }
}

/// Lay out a whole formula.
pub fn layout(nodes: &[Node], config: &RenderConfig) -> LayoutBox {
    let style = Style {
        family: &config.font_family,
        size: config.font_size,
    };
    layout_row(nodes, style)
}

fn layout_row(nodes: &[Node], style: Style) -> LayoutBox {
    // An empty row still occupies one line
    let mut row = LayoutBox {
        ascent: style.size * ASCENT,
        descent: style.size * DESCENT,
        ..LayoutBox::default()
    };
    for node in nodes {
        let child = layout_node(node, style);
        let x = row.width;
        row.place(child, x, 0.0);
    }
    row
}

/// Lay out an operand whose grouping brackets are not drawn.
fn layout_argument(node: &Node, style: Style) -> LayoutBox {
    match node.unbracketed() {
        Some(body) => layout_row(body, style),
        None => layout_node(node, style),
    }
}

fn layout_node(node: &Node, style: Style) -> LayoutBox {
    match node {
        Node::Number(s) => glyphs(s, style, false, 0.0, 0.0),
        Node::Identifier(s) => glyphs(s, style, true, 0.0, 0.0),
        Node::Text(s) => glyphs(s, style, false, 0.0, 0.0),
        Node::Operator(c) => {
            let (left, right) = operator_spacing(*c);
            glyphs(
                &c.to_string(),
                style,
                false,
                left * style.size,
                right * style.size,
            )
        }
        Node::Symbol(sym) => match sym.kind {
            SymbolKind::Ordinary => glyphs(sym.glyph, style, false, 0.0, 0.0),
            SymbolKind::Relation => {
                let pad = 0.28 * style.size;
                glyphs(sym.glyph, style, false, pad, pad)
            }
            SymbolKind::Binary => {
                let pad = 0.22 * style.size;
                glyphs(sym.glyph, style, false, pad, pad)
            }
            SymbolKind::Function => glyphs(sym.glyph, style, false, 0.0, 0.17 * style.size),
            SymbolKind::Large => {
                let big = style.scaled(LARGE_SCALE);
                let glyph = glyphs(sym.glyph, big, false, 0.0, 0.1 * style.size);
                // Centre the enlarged glyph on the math axis
                let shift = (big.size - style.size) * (ASCENT - DESCENT) / 2.0;
                let mut out = LayoutBox::default();
                out.place(glyph, 0.0, shift);
                out
            }
        },
        Node::Group { open, close, body } => layout_group(*open, *close, body, style),
        Node::Sqrt(inner) => layout_sqrt(layout_argument(inner, style), style),
        Node::Overline(inner) => {
            let inner = layout_argument(inner, style);
            let y = -(inner.ascent + GAP * style.size);
            let width = inner.width;
            let mut out = LayoutBox::default();
            out.place(inner, 0.0, 0.0);
            out.elems.push(rule((0.0, y), (width, y), style));
            out.ascent = out.ascent.max(-y + RULE * style.size);
            out
        }
        Node::Scripts { base, sub, sup } => {
            layout_scripts(base, sub.as_deref(), sup.as_deref(), style)
        }
        Node::Fraction {
            numerator,
            denominator,
        } => layout_fraction(numerator, denominator, style),
    }
}

fn glyphs(text: &str, style: Style, italic: bool, left: f32, right: f32) -> LayoutBox {
    LayoutBox {
        width: left + text.chars().count() as f32 * GLYPH_ADVANCE * style.size + right,
        ascent: style.size * ASCENT,
        descent: style.size * DESCENT,
        elems: vec![Elem::Text {
            x: left,
            y: 0.0,
            text: text.to_string(),
            font_size: style.size,
            font_family: style.family.to_string(),
            italic,
            color: BLACK,
        }],
    }
}

fn rule(from: (f32, f32), to: (f32, f32), style: Style) -> Elem {
    Elem::Line {
        from,
        to,
        width: RULE * style.size,
        color: BLACK,
    }
}

/// Space before and after an operator character, relative to the font size.
fn operator_spacing(c: char) -> (f32, f32) {
    match c {
        '=' | '<' | '>' => (0.28, 0.28),
        '+' | '-' => (0.22, 0.22),
        ',' | ';' | ':' => (0.0, 0.17),
        _ => (0.0, 0.0),
    }
}

fn layout_group(open: char, close: char, body: &[Node], style: Style) -> LayoutBox {
    let inner = layout_row(body, style);
    // Brackets grow with their content
    let bracket_size = style.size.max(inner.height() / (ASCENT + DESCENT));
    let bracket_style = Style {
        size: bracket_size,
        ..style
    };
    // Align the bracket's vertical centre with the content's
    let inner_centre = (inner.descent - inner.ascent) / 2.0;
    let bracket_centre = (DESCENT - ASCENT) / 2.0 * bracket_size;
    let dy = inner_centre - bracket_centre;

    let bracket = |c: char| {
        let mut b = glyphs(&c.to_string(), bracket_style, false, 0.0, 0.0);
        b.width = BRACKET_ADVANCE * bracket_size;
        b
    };

    let mut out = LayoutBox::default();
    let left = bracket(open);
    let left_width = left.width;
    out.place(left, 0.0, dy);
    let inner_width = inner.width;
    out.place(inner, left_width, 0.0);
    out.place(bracket(close), left_width + inner_width, dy);
    out
}

fn layout_sqrt(inner: LayoutBox, style: Style) -> LayoutBox {
    let size = style.size;
    let gap = GAP * size;
    let radical = 0.55 * size;
    let top = inner.ascent + gap;
    let end = radical + inner.width + gap;
    let points = vec![
        (0.0, -top * 0.45),
        (radical * 0.3, -top * 0.55),
        (radical * 0.6, inner.descent),
        (radical, -top),
        (end, -top),
    ];

    let mut out = LayoutBox::default();
    out.place(inner, radical, 0.0);
    out.elems.push(Elem::Polyline {
        points,
        width: RULE * size,
        color: BLACK,
    });
    out.width = end;
    out.ascent = out.ascent.max(top + RULE * size);
    out
}

fn layout_scripts(base: &Node, sub: Option<&Node>, sup: Option<&Node>, style: Style) -> LayoutBox {
    let base = layout_node(base, style);
    let small = style.scaled(SCRIPT_SCALE);
    let x = base.width;

    let mut out = LayoutBox::default();
    out.place(base, 0.0, 0.0);
    let mut width = x;
    if let Some(sup) = sup {
        let sup = layout_argument(sup, small);
        width = width.max(x + sup.width);
        out.place(sup, x, -0.45 * style.size);
    }
    if let Some(sub) = sub {
        let sub = layout_argument(sub, small);
        width = width.max(x + sub.width);
        out.place(sub, x, 0.25 * style.size);
    }
    out.width = width;
    out
}

fn layout_fraction(numerator: &Node, denominator: &Node, style: Style) -> LayoutBox {
    let part = style.scaled(FRACTION_SCALE);
    let num = layout_argument(numerator, part);
    let den = layout_argument(denominator, part);

    let size = style.size;
    let pad = 0.1 * size;
    let axis = AXIS * size;
    let half_rule = RULE * size / 2.0;
    let gap = GAP * size;
    let width = num.width.max(den.width) + 2.0 * pad;

    let num_x = (width - num.width) / 2.0;
    let num_y = -(axis + half_rule + gap + num.descent);
    let den_x = (width - den.width) / 2.0;
    let den_y = -axis + half_rule + gap + den.ascent;

    let mut out = LayoutBox::default();
    out.place(num, num_x, num_y);
    out.place(den, den_x, den_y);
    out.elems.push(rule((pad / 2.0, -axis), (width - pad / 2.0, -axis), style));
    out.width = width;
    out
}

/// A laid-out formula painted in the requested colors.
pub struct FormulaImage<'a> {
    pub layout: &'a LayoutBox,
    pub foreground: Color,
    pub background: Color,
}

impl Drawable for FormulaImage<'_> {
    fn draw(&self, config: &RenderConfig) -> Drawing {
        let margin = config.margin;
        let elems = self
            .layout
            .elems
            .iter()
            .cloned()
            .map(|mut e| {
                e.translate(margin, margin + self.layout.ascent);
                e.set_color(self.foreground);
                e
            })
            .collect();

        Drawing {
            width: self.layout.width + 2.0 * margin,
            height: self.layout.height() + 2.0 * margin,
            background: self.background,
            elems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asciimath::parser::parse_formula;
    use crate::color::WHITE;

    fn lay(source: &str) -> LayoutBox {
        layout(&parse_formula(source).unwrap(), &RenderConfig::default())
    }

    #[test]
    fn test_row_width_adds_up() {
        let config = RenderConfig::default();
        let one = lay("x");
        let two = lay("xy");
        assert!((one.width - GLYPH_ADVANCE * config.font_size).abs() < 1e-4);
        assert!((two.width - 2.0 * one.width).abs() < 1e-4);
    }

    #[test]
    fn test_superscript_raises_ascent() {
        let plain = lay("x");
        let squared = lay("x^2");
        assert!(squared.ascent > plain.ascent);
        assert!(squared.width > plain.width);
    }

    #[test]
    fn test_fraction_is_taller_than_row() {
        let row = lay("a+b");
        let frac = lay("a/b");
        assert!(frac.height() > row.height());
        assert!(frac.elems.iter().any(|e| matches!(e, Elem::Line { .. })));
    }

    #[test]
    fn test_sqrt_draws_radical() {
        let root = lay("sqrt x");
        assert!(root.elems.iter().any(|e| matches!(e, Elem::Polyline { .. })));
        assert!(root.width > lay("x").width);
    }

    #[test]
    fn test_group_brackets_grow() {
        let small = lay("(x)");
        let tall = lay("(a/b)");
        let bracket_size = |b: &LayoutBox| match &b.elems[0] {
            Elem::Text { font_size, .. } => *font_size,
            other => panic!("expected bracket text, got {:?}", other),
        };
        assert!(bracket_size(&tall) > bracket_size(&small));
    }

    #[test]
    fn test_empty_formula_has_a_line() {
        let empty = lay("");
        assert_eq!(empty.width, 0.0);
        assert!(empty.height() > 0.0);
    }

    #[test]
    fn test_drawing_applies_colors_and_margin() {
        let config = RenderConfig::default();
        let layout = lay("x");
        let red = Color::new(255, 0, 0);
        let drawing = FormulaImage {
            layout: &layout,
            foreground: red,
            background: WHITE,
        }
        .draw(&config);

        assert_eq!(drawing.background, WHITE);
        assert!((drawing.width - (layout.width + 2.0 * config.margin)).abs() < 1e-4);
        match &drawing.elems[0] {
            Elem::Text { x, y, color, italic, .. } => {
                assert_eq!(*color, red);
                assert!(*italic);
                assert!((x - config.margin).abs() < 1e-4);
                assert!((y - (config.margin + layout.ascent)).abs() < 1e-4);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
