use std::fmt;

use serde::{Serialize, Serializer};

/// Straight (non-premultiplied) 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba8 = Rgba8::rgb(0, 0, 0).with_alpha(0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a CSS colour value.
///
/// Supports:
/// - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
/// - `rgb()` / `rgba()` with comma or space separated channels, numbers or percentages
/// - `hsl()` / `hsla()`
/// - the CSS named colours and `transparent`
pub fn parse_css_color(input: &str) -> Option<Rgba8> {
    let s = input.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some((name, args)) = s.strip_suffix(')').and_then(|f| f.split_once('(')) {
        return match name.trim() {
            "rgb" | "rgba" => parse_rgb_function(args),
            "hsl" | "hsla" => parse_hsl_function(args),
            _ => None,
        };
    }
    parse_named(&s)
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba8::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba8::rgb(nibble(0)?, nibble(1)?, nibble(2)?).with_alpha(nibble(3)?)),
        6 => Some(Rgba8::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba8::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)?)),
        _ => None,
    }
}

// Splits `a, b, c[, d]` or `a b c[ / d]` into colour channels and optional alpha.
fn split_args(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let (channels, alpha) = match args.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (args, None),
    };
    let mut parts: Vec<&str> = if channels.contains(',') {
        channels.split(',').map(str::trim).collect()
    } else {
        channels.split_whitespace().collect()
    };
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    match (parts.len(), alpha) {
        (3, alpha) => Some((parts, alpha)),
        (4, None) => {
            let alpha = parts.pop();
            Some((parts, alpha))
        }
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Rgba8> {
    let (channels, alpha) = split_args(args)?;
    let channel = |s: &str| -> Option<u8> {
        let v = match s.strip_suffix('%') {
            Some(p) => p.trim().parse::<f32>().ok()? / 100.0,
            None => s.parse::<f32>().ok()? / 255.0,
        };
        Some(clamp_unit(v))
    };
    let color = Rgba8::rgb(channel(channels[0])?, channel(channels[1])?, channel(channels[2])?);
    Some(color.with_alpha(alpha_channel(alpha)?))
}

fn parse_hsl_function(args: &str) -> Option<Rgba8> {
    let (channels, alpha) = split_args(args)?;
    let hue = channels[0].strip_suffix("deg").unwrap_or(channels[0]).trim().parse::<f32>().ok()?;
    let percent = |s: &str| {
        let v = s.strip_suffix('%')?.trim().parse::<f32>().ok()?;
        Some((v / 100.0).clamp(0.0, 1.0))
    };
    let (s, l) = (percent(channels[1])?, percent(channels[2])?);

    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let color = Rgba8::rgb(clamp_unit(r + m), clamp_unit(g + m), clamp_unit(b + m));
    Some(color.with_alpha(alpha_channel(alpha)?))
}

// Missing alpha is opaque; otherwise a 0..1 number or a percentage.
fn alpha_channel(alpha: Option<&str>) -> Option<u8> {
    let Some(a) = alpha else {
        return Some(0xff);
    };
    let v = match a.strip_suffix('%') {
        Some(p) => p.trim().parse::<f32>().ok()? / 100.0,
        None => a.parse::<f32>().ok()?,
    };
    Some(clamp_unit(v))
}

fn clamp_unit(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_named(name: &str) -> Option<Rgba8> {
    if name == "transparent" {
        return Some(Rgba8::TRANSPARENT);
    }
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| NAMED_COLORS[i].1)
}

// Sorted by name.
const NAMED_COLORS: &[(&str, Rgba8)] = &[
    ("aliceblue", Rgba8::rgb(0xf0, 0xf8, 0xff)),
    ("antiquewhite", Rgba8::rgb(0xfa, 0xeb, 0xd7)),
    ("aqua", Rgba8::rgb(0x00, 0xff, 0xff)),
    ("aquamarine", Rgba8::rgb(0x7f, 0xff, 0xd4)),
    ("azure", Rgba8::rgb(0xf0, 0xff, 0xff)),
    ("beige", Rgba8::rgb(0xf5, 0xf5, 0xdc)),
    ("bisque", Rgba8::rgb(0xff, 0xe4, 0xc4)),
    ("black", Rgba8::rgb(0x00, 0x00, 0x00)),
    ("blanchedalmond", Rgba8::rgb(0xff, 0xeb, 0xcd)),
    ("blue", Rgba8::rgb(0x00, 0x00, 0xff)),
    ("blueviolet", Rgba8::rgb(0x8a, 0x2b, 0xe2)),
    ("brown", Rgba8::rgb(0xa5, 0x2a, 0x2a)),
    ("burlywood", Rgba8::rgb(0xde, 0xb8, 0x87)),
    ("cadetblue", Rgba8::rgb(0x5f, 0x9e, 0xa0)),
    ("chartreuse", Rgba8::rgb(0x7f, 0xff, 0x00)),
    ("chocolate", Rgba8::rgb(0xd2, 0x69, 0x1e)),
    ("coral", Rgba8::rgb(0xff, 0x7f, 0x50)),
    ("cornflowerblue", Rgba8::rgb(0x64, 0x95, 0xed)),
    ("cornsilk", Rgba8::rgb(0xff, 0xf8, 0xdc)),
    ("crimson", Rgba8::rgb(0xdc, 0x14, 0x3c)),
    ("cyan", Rgba8::rgb(0x00, 0xff, 0xff)),
    ("darkblue", Rgba8::rgb(0x00, 0x00, 0x8b)),
    ("darkcyan", Rgba8::rgb(0x00, 0x8b, 0x8b)),
    ("darkgoldenrod", Rgba8::rgb(0xb8, 0x86, 0x0b)),
    ("darkgray", Rgba8::rgb(0xa9, 0xa9, 0xa9)),
    ("darkgreen", Rgba8::rgb(0x00, 0x64, 0x00)),
    ("darkgrey", Rgba8::rgb(0xa9, 0xa9, 0xa9)),
    ("darkkhaki", Rgba8::rgb(0xbd, 0xb7, 0x6b)),
    ("darkmagenta", Rgba8::rgb(0x8b, 0x00, 0x8b)),
    ("darkolivegreen", Rgba8::rgb(0x55, 0x6b, 0x2f)),
    ("darkorange", Rgba8::rgb(0xff, 0x8c, 0x00)),
    ("darkorchid", Rgba8::rgb(0x99, 0x32, 0xcc)),
    ("darkred", Rgba8::rgb(0x8b, 0x00, 0x00)),
    ("darksalmon", Rgba8::rgb(0xe9, 0x96, 0x7a)),
    ("darkseagreen", Rgba8::rgb(0x8f, 0xbc, 0x8f)),
    ("darkslateblue", Rgba8::rgb(0x48, 0x3d, 0x8b)),
    ("darkslategray", Rgba8::rgb(0x2f, 0x4f, 0x4f)),
    ("darkslategrey", Rgba8::rgb(0x2f, 0x4f, 0x4f)),
    ("darkturquoise", Rgba8::rgb(0x00, 0xce, 0xd1)),
    ("darkviolet", Rgba8::rgb(0x94, 0x00, 0xd3)),
    ("deeppink", Rgba8::rgb(0xff, 0x14, 0x93)),
    ("deepskyblue", Rgba8::rgb(0x00, 0xbf, 0xff)),
    ("dimgray", Rgba8::rgb(0x69, 0x69, 0x69)),
    ("dimgrey", Rgba8::rgb(0x69, 0x69, 0x69)),
    ("dodgerblue", Rgba8::rgb(0x1e, 0x90, 0xff)),
    ("firebrick", Rgba8::rgb(0xb2, 0x22, 0x22)),
    ("floralwhite", Rgba8::rgb(0xff, 0xfa, 0xf0)),
    ("forestgreen", Rgba8::rgb(0x22, 0x8b, 0x22)),
    ("fuchsia", Rgba8::rgb(0xff, 0x00, 0xff)),
    ("gainsboro", Rgba8::rgb(0xdc, 0xdc, 0xdc)),
    ("ghostwhite", Rgba8::rgb(0xf8, 0xf8, 0xff)),
    ("gold", Rgba8::rgb(0xff, 0xd7, 0x00)),
    ("goldenrod", Rgba8::rgb(0xda, 0xa5, 0x20)),
    ("gray", Rgba8::rgb(0x80, 0x80, 0x80)),
    ("green", Rgba8::rgb(0x00, 0x80, 0x00)),
    ("greenyellow", Rgba8::rgb(0xad, 0xff, 0x2f)),
    ("grey", Rgba8::rgb(0x80, 0x80, 0x80)),
    ("honeydew", Rgba8::rgb(0xf0, 0xff, 0xf0)),
    ("hotpink", Rgba8::rgb(0xff, 0x69, 0xb4)),
    ("indianred", Rgba8::rgb(0xcd, 0x5c, 0x5c)),
    ("indigo", Rgba8::rgb(0x4b, 0x00, 0x82)),
    ("ivory", Rgba8::rgb(0xff, 0xff, 0xf0)),
    ("khaki", Rgba8::rgb(0xf0, 0xe6, 0x8c)),
    ("lavender", Rgba8::rgb(0xe6, 0xe6, 0xfa)),
    ("lavenderblush", Rgba8::rgb(0xff, 0xf0, 0xf5)),
    ("lawngreen", Rgba8::rgb(0x7c, 0xfc, 0x00)),
    ("lemonchiffon", Rgba8::rgb(0xff, 0xfa, 0xcd)),
    ("lightblue", Rgba8::rgb(0xad, 0xd8, 0xe6)),
    ("lightcoral", Rgba8::rgb(0xf0, 0x80, 0x80)),
    ("lightcyan", Rgba8::rgb(0xe0, 0xff, 0xff)),
    ("lightgoldenrodyellow", Rgba8::rgb(0xfa, 0xfa, 0xd2)),
    ("lightgray", Rgba8::rgb(0xd3, 0xd3, 0xd3)),
    ("lightgreen", Rgba8::rgb(0x90, 0xee, 0x90)),
    ("lightgrey", Rgba8::rgb(0xd3, 0xd3, 0xd3)),
    ("lightpink", Rgba8::rgb(0xff, 0xb6, 0xc1)),
    ("lightsalmon", Rgba8::rgb(0xff, 0xa0, 0x7a)),
    ("lightseagreen", Rgba8::rgb(0x20, 0xb2, 0xaa)),
    ("lightskyblue", Rgba8::rgb(0x87, 0xce, 0xfa)),
    ("lightslategray", Rgba8::rgb(0x77, 0x88, 0x99)),
    ("lightslategrey", Rgba8::rgb(0x77, 0x88, 0x99)),
    ("lightsteelblue", Rgba8::rgb(0xb0, 0xc4, 0xde)),
    ("lightyellow", Rgba8::rgb(0xff, 0xff, 0xe0)),
    ("lime", Rgba8::rgb(0x00, 0xff, 0x00)),
    ("limegreen", Rgba8::rgb(0x32, 0xcd, 0x32)),
    ("linen", Rgba8::rgb(0xfa, 0xf0, 0xe6)),
    ("magenta", Rgba8::rgb(0xff, 0x00, 0xff)),
    ("maroon", Rgba8::rgb(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Rgba8::rgb(0x66, 0xcd, 0xaa)),
    ("mediumblue", Rgba8::rgb(0x00, 0x00, 0xcd)),
    ("mediumorchid", Rgba8::rgb(0xba, 0x55, 0xd3)),
    ("mediumpurple", Rgba8::rgb(0x93, 0x70, 0xdb)),
    ("mediumseagreen", Rgba8::rgb(0x3c, 0xb3, 0x71)),
    ("mediumslateblue", Rgba8::rgb(0x7b, 0x68, 0xee)),
    ("mediumspringgreen", Rgba8::rgb(0x00, 0xfa, 0x9a)),
    ("mediumturquoise", Rgba8::rgb(0x48, 0xd1, 0xcc)),
    ("mediumvioletred", Rgba8::rgb(0xc7, 0x15, 0x85)),
    ("midnightblue", Rgba8::rgb(0x19, 0x19, 0x70)),
    ("mintcream", Rgba8::rgb(0xf5, 0xff, 0xfa)),
    ("mistyrose", Rgba8::rgb(0xff, 0xe4, 0xe1)),
    ("moccasin", Rgba8::rgb(0xff, 0xe4, 0xb5)),
    ("navajowhite", Rgba8::rgb(0xff, 0xde, 0xad)),
    ("navy", Rgba8::rgb(0x00, 0x00, 0x80)),
    ("oldlace", Rgba8::rgb(0xfd, 0xf5, 0xe6)),
    ("olive", Rgba8::rgb(0x80, 0x80, 0x00)),
    ("olivedrab", Rgba8::rgb(0x6b, 0x8e, 0x23)),
    ("orange", Rgba8::rgb(0xff, 0xa5, 0x00)),
    ("orangered", Rgba8::rgb(0xff, 0x45, 0x00)),
    ("orchid", Rgba8::rgb(0xda, 0x70, 0xd6)),
    ("palegoldenrod", Rgba8::rgb(0xee, 0xe8, 0xaa)),
    ("palegreen", Rgba8::rgb(0x98, 0xfb, 0x98)),
    ("paleturquoise", Rgba8::rgb(0xaf, 0xee, 0xee)),
    ("palevioletred", Rgba8::rgb(0xdb, 0x70, 0x93)),
    ("papayawhip", Rgba8::rgb(0xff, 0xef, 0xd5)),
    ("peachpuff", Rgba8::rgb(0xff, 0xda, 0xb9)),
    ("peru", Rgba8::rgb(0xcd, 0x85, 0x3f)),
    ("pink", Rgba8::rgb(0xff, 0xc0, 0xcb)),
    ("plum", Rgba8::rgb(0xdd, 0xa0, 0xdd)),
    ("powderblue", Rgba8::rgb(0xb0, 0xe0, 0xe6)),
    ("purple", Rgba8::rgb(0x80, 0x00, 0x80)),
    ("rebeccapurple", Rgba8::rgb(0x66, 0x33, 0x99)),
    ("red", Rgba8::rgb(0xff, 0x00, 0x00)),
    ("rosybrown", Rgba8::rgb(0xbc, 0x8f, 0x8f)),
    ("royalblue", Rgba8::rgb(0x41, 0x69, 0xe1)),
    ("saddlebrown", Rgba8::rgb(0x8b, 0x45, 0x13)),
    ("salmon", Rgba8::rgb(0xfa, 0x80, 0x72)),
    ("sandybrown", Rgba8::rgb(0xf4, 0xa4, 0x60)),
    ("seagreen", Rgba8::rgb(0x2e, 0x8b, 0x57)),
    ("seashell", Rgba8::rgb(0xff, 0xf5, 0xee)),
    ("sienna", Rgba8::rgb(0xa0, 0x52, 0x2d)),
    ("silver", Rgba8::rgb(0xc0, 0xc0, 0xc0)),
    ("skyblue", Rgba8::rgb(0x87, 0xce, 0xeb)),
    ("slateblue", Rgba8::rgb(0x6a, 0x5a, 0xcd)),
    ("slategray", Rgba8::rgb(0x70, 0x80, 0x90)),
    ("slategrey", Rgba8::rgb(0x70, 0x80, 0x90)),
    ("snow", Rgba8::rgb(0xff, 0xfa, 0xfa)),
    ("springgreen", Rgba8::rgb(0x00, 0xff, 0x7f)),
    ("steelblue", Rgba8::rgb(0x46, 0x82, 0xb4)),
    ("tan", Rgba8::rgb(0xd2, 0xb4, 0x8c)),
    ("teal", Rgba8::rgb(0x00, 0x80, 0x80)),
    ("thistle", Rgba8::rgb(0xd8, 0xbf, 0xd8)),
    ("tomato", Rgba8::rgb(0xff, 0x63, 0x47)),
    ("turquoise", Rgba8::rgb(0x40, 0xe0, 0xd0)),
    ("violet", Rgba8::rgb(0xee, 0x82, 0xee)),
    ("wheat", Rgba8::rgb(0xf5, 0xde, 0xb3)),
    ("white", Rgba8::rgb(0xff, 0xff, 0xff)),
    ("whitesmoke", Rgba8::rgb(0xf5, 0xf5, 0xf5)),
    ("yellow", Rgba8::rgb(0xff, 0xff, 0x00)),
    ("yellowgreen", Rgba8::rgb(0x9a, 0xcd, 0x32)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(parse_css_color("#000"), Some(Rgba8::BLACK));
        assert_eq!(parse_css_color("#fff"), Some(Rgba8::WHITE));
        assert_eq!(parse_css_color("#1A2b3C"), Some(Rgba8::rgb(0x1a, 0x2b, 0x3c)));
        let red = Rgba8::rgb(0xff, 0, 0);
        assert_eq!(parse_css_color("#ff000080"), Some(red.with_alpha(0x80)));
        assert_eq!(parse_css_color("#f008"), Some(red.with_alpha(0x88)));
    }

    #[test]
    fn parses_named_colours() {
        assert_eq!(parse_css_color(" White "), Some(Rgba8::WHITE));
        assert_eq!(parse_css_color("red"), Some(Rgba8::rgb(255, 0, 0)));
        assert_eq!(parse_css_color("lightblue"), Some(Rgba8::rgb(0xad, 0xd8, 0xe6)));
        assert_eq!(parse_css_color("RebeccaPurple"), Some(Rgba8::rgb(0x66, 0x33, 0x99)));
        assert_eq!(parse_css_color("transparent"), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn named_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(parse_css_color("rgb(255, 0, 0)"), Some(Rgba8::rgb(255, 0, 0)));
        assert_eq!(parse_css_color("rgb(1,2,3)"), Some(Rgba8::rgb(1, 2, 3)));
        assert_eq!(parse_css_color("rgb(0 128 255)"), Some(Rgba8::rgb(0, 128, 255)));
        assert_eq!(parse_css_color("rgb(100%, 0%, 50%)"), Some(Rgba8::rgb(255, 0, 128)));
        let blue = Rgba8::rgb(0, 0, 255);
        assert_eq!(parse_css_color("rgba(0, 0, 255, 0.5)"), Some(blue.with_alpha(128)));
        assert_eq!(parse_css_color("rgb(0 0 255 / 25%)"), Some(blue.with_alpha(64)));
    }

    #[test]
    fn parses_hsl_functions() {
        assert_eq!(parse_css_color("hsl(0, 100%, 50%)"), Some(Rgba8::rgb(255, 0, 0)));
        assert_eq!(parse_css_color("hsl(120deg 100% 25%)"), Some(Rgba8::rgb(0, 128, 0)));
        let clear_blue = Rgba8::rgb(0, 0, 255).with_alpha(0);
        assert_eq!(parse_css_color("hsla(240, 100%, 50%, 0)"), Some(clear_blue));
    }

    #[test]
    fn rejects_garbage() {
        let bad = [
            "", "#", "#12", "#12345", "123456", "#gggggg", "#ééé", "notacolor", "rgb(1,2)", "rgb(a,b,c)",
            "hsl(0, 1, 2)",
        ];
        for value in bad {
            assert_eq!(parse_css_color(value), None, "{value:?}");
        }
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Rgba8::rgb(0x12, 0xab, 0x00).to_string(), "#12ab00");
        assert_eq!(Rgba8::TRANSPARENT.to_string(), "#00000000");
    }
}
