//! Conversion of parsed AsciiMath into LaTeX.

use super::parser::Node;

/// Convert a node sequence to LaTeX.
pub fn to_latex(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_part(&mut out, &node_latex(node));
    }
    out
}

/// Append `part`, separating a trailing control word from a following letter.
fn push_part(out: &mut String, part: &str) {
    let starts_with_letter = part.chars().next().map_or(false, |c| c.is_ascii_alphabetic());
    if starts_with_letter && ends_with_control_word(out) {
        out.push(' ');
    }
    out.push_str(part);
}

fn ends_with_control_word(s: &str) -> bool {
    match s.rfind('\\') {
        Some(idx) => {
            let word = &s[idx + 1..];
            !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

fn node_latex(node: &Node) -> String {
    match node {
        Node::Number(s) | Node::Identifier(s) => s.clone(),
        Node::Operator(c) => c.to_string(),
        Node::Symbol(sym) => sym.latex.to_string(),
        Node::Text(t) => format!("\\text{{{}}}", t),
        Node::Group { open, close, body } => format!(
            "\\left{}{}\\right{}",
            bracket(*open),
            to_latex(body),
            bracket(*close)
        ),
        Node::Sqrt(inner) => format!("\\sqrt{{{}}}", argument(inner)),
        Node::Overline(inner) => format!("\\overline{{{}}}", argument(inner)),
        Node::Scripts { base, sub, sup } => {
            let mut out = node_latex(base);
            if let Some(sub) = sub {
                out.push_str(&format!("_{{{}}}", argument(sub)));
            }
            if let Some(sup) = sup {
                out.push_str(&format!("^{{{}}}", argument(sup)));
            }
            out
        }
        Node::Fraction {
            numerator,
            denominator,
        } => format!(
            "\\frac{{{}}}{{{}}}",
            argument(numerator),
            argument(denominator)
        ),
    }
}

/// LaTeX for an operand, dropping the brackets that only served to group it.
fn argument(node: &Node) -> String {
    match node.unbracketed() {
        Some(body) => to_latex(body),
        None => node_latex(node),
    }
}

fn bracket(c: char) -> String {
    match c {
        '{' => "\\{".to_string(),
        '}' => "\\}".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asciimath::parser::parse_formula;
    use pretty_assertions::assert_eq;

    fn latex(source: &str) -> String {
        to_latex(&parse_formula(source).unwrap())
    }

    #[test]
    fn test_scripts() {
        assert_eq!(latex("x^2+y^2=z^2"), "x^{2}+y^{2}=z^{2}");
        assert_eq!(latex("a_(i+1)"), "a_{i+1}");
    }

    #[test]
    fn test_fraction_drops_brackets() {
        assert_eq!(latex("(a+b)/c"), "\\frac{a+b}{c}");
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
    }

    #[test]
    fn test_control_word_spacing() {
        assert_eq!(latex("alpha x"), "\\alpha x");
        assert_eq!(latex("x in A"), "x\\in A");
        assert_eq!(latex("sin(x)"), "\\sin\\left(x\\right)");
    }

    #[test]
    fn test_braces_are_escaped() {
        assert_eq!(latex("{a}"), "\\left\\{a\\right\\}");
    }

    #[test]
    fn test_text() {
        assert_eq!(latex("text(if) x"), "\\text{if}x");
    }
}
