//! Named AsciiMath symbols.

/// How a symbol behaves when typeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Letters and constants, set without extra space.
    Ordinary,
    /// Relations such as `=` or `<=`, with generous space on both sides.
    Relation,
    /// Binary operators such as `+-` or `xx`.
    Binary,
    /// Big operators such as `sum`, set larger than the surrounding text.
    Large,
    /// Named functions such as `sin`, set upright.
    Function,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Symbol {
    /// The AsciiMath spelling.
    pub name: &'static str,
    /// The equivalent LaTeX command.
    pub latex: &'static str,
    /// The Unicode text drawn for the symbol.
    pub glyph: &'static str,
    pub kind: SymbolKind,
}

macro_rules! symbols {
    ($(($name:expr, $latex:expr, $glyph:expr, $kind:ident)),* $(,)?) => {
        &[$(Symbol { name: $name, latex: $latex, glyph: $glyph, kind: SymbolKind::$kind }),*]
    };
}

pub static SYMBOLS: &[Symbol] = symbols![
    // Greek
    ("alpha", "\\alpha", "α", Ordinary),
    ("beta", "\\beta", "β", Ordinary),
    ("gamma", "\\gamma", "γ", Ordinary),
    ("delta", "\\delta", "δ", Ordinary),
    ("epsilon", "\\epsilon", "ε", Ordinary),
    ("zeta", "\\zeta", "ζ", Ordinary),
    ("eta", "\\eta", "η", Ordinary),
    ("theta", "\\theta", "θ", Ordinary),
    ("kappa", "\\kappa", "κ", Ordinary),
    ("lambda", "\\lambda", "λ", Ordinary),
    ("mu", "\\mu", "μ", Ordinary),
    ("nu", "\\nu", "ν", Ordinary),
    ("xi", "\\xi", "ξ", Ordinary),
    ("pi", "\\pi", "π", Ordinary),
    ("rho", "\\rho", "ρ", Ordinary),
    ("sigma", "\\sigma", "σ", Ordinary),
    ("tau", "\\tau", "τ", Ordinary),
    ("phi", "\\phi", "φ", Ordinary),
    ("chi", "\\chi", "χ", Ordinary),
    ("psi", "\\psi", "ψ", Ordinary),
    ("omega", "\\omega", "ω", Ordinary),
    ("Gamma", "\\Gamma", "Γ", Ordinary),
    ("Delta", "\\Delta", "Δ", Ordinary),
    ("Theta", "\\Theta", "Θ", Ordinary),
    ("Lambda", "\\Lambda", "Λ", Ordinary),
    ("Pi", "\\Pi", "Π", Ordinary),
    ("Sigma", "\\Sigma", "Σ", Ordinary),
    ("Phi", "\\Phi", "Φ", Ordinary),
    ("Omega", "\\Omega", "Ω", Ordinary),
    // Misc
    ("oo", "\\infty", "∞", Ordinary),
    ("del", "\\partial", "∂", Ordinary),
    ("grad", "\\nabla", "∇", Ordinary),
    // Binary operators
    ("+-", "\\pm", "±", Binary),
    ("xx", "\\times", "×", Binary),
    ("-:", "\\div", "÷", Binary),
    ("**", "\\ast", "∗", Binary),
    ("*", "\\cdot", "⋅", Binary),
    // Relations
    ("<=", "\\le", "≤", Relation),
    (">=", "\\ge", "≥", Relation),
    ("!=", "\\ne", "≠", Relation),
    ("~~", "\\approx", "≈", Relation),
    ("-=", "\\equiv", "≡", Relation),
    ("->", "\\to", "→", Relation),
    ("=>", "\\Rightarrow", "⇒", Relation),
    ("in", "\\in", "∈", Relation),
    // Large operators
    ("sum", "\\sum", "∑", Large),
    ("prod", "\\prod", "∏", Large),
    ("int", "\\int", "∫", Large),
    // Functions
    ("sin", "\\sin", "sin", Function),
    ("cos", "\\cos", "cos", Function),
    ("tan", "\\tan", "tan", Function),
    ("log", "\\log", "log", Function),
    ("ln", "\\ln", "ln", Function),
    ("exp", "\\exp", "exp", Function),
    ("lim", "\\lim", "lim", Function),
];

/// Find the longest symbol name `input` starts with.
pub fn lookup(input: &str) -> Option<&'static Symbol> {
    SYMBOLS
        .iter()
        .filter(|sym| input.starts_with(sym.name))
        .max_by_key(|sym| sym.name.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(lookup("int_0^1").unwrap().name, "int");
        assert_eq!(lookup("in A").unwrap().name, "in");
        assert_eq!(lookup("** b").unwrap().name, "**");
        assert_eq!(lookup("* b").unwrap().name, "*");
    }

    #[test]
    fn test_no_match() {
        assert!(lookup("x").is_none());
        assert!(lookup("").is_none());
    }
}
