/// Linear-ish RGBA colour with components in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        Self([rgb[0], rgb[1], rgb[2], 1.0])
    }

    /// `0xRRGGBB` as used for light and background colours.
    pub fn from_hex_u32(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self([r, g, b, 1.0])
    }

    /// RGB scaled by `s`, alpha untouched. Used to fold light intensity in.
    pub fn scaled(self, s: f32) -> Self {
        let [r, g, b, a] = self.0;
        Self([r * s, g * s, b * s, a])
    }
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Rgba::from_rgb([
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    ]))
}

#[cfg(test)]
mod tests {
    use super::{Rgba, parse_hex_color};

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Rgba([1.0, 0.0, 0.0, 1.0])));
        assert_eq!(parse_hex_color("00ff00"), Some(Rgba([0.0, 1.0, 0.0, 1.0])));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn hex_u32_matches_string_form() {
        assert_eq!(Rgba::from_hex_u32(0x4ecdc4), parse_hex_color("#4ecdc4").unwrap());
    }
}
