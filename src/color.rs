//! Colors used for foreground and background painting.

pub use rgb::RGB8 as Color;

pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

/// Format a color as an SVG `#rrggbb` value.
pub fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Parse `#rgb` or `#rrggbb` (the `#` is optional).
pub fn parse_hex(input: &str) -> Option<Color> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::new(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(Color::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(to_hex(BLACK), "#000000");
        assert_eq!(parse_hex("#ff8000"), Some(Color::new(255, 128, 0)));
        assert_eq!(parse_hex("fff"), Some(WHITE));
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }
}
