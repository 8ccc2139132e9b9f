// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

/// An 8-bit RGBA color.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Constructs a new opaque `Color` from RGB values.
    #[inline]
    pub fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Constructs a new opaque black `Color`.
    #[inline]
    pub fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Packs the color as `0xAARRGGBB`.
    #[inline]
    pub fn to_argb(&self) -> u32 {
        (self.alpha as u32) << 24
            | (self.red as u32) << 16
            | (self.green as u32) << 8
            | self.blue as u32
    }
}

impl From<svgtypes::Color> for Color {
    #[inline]
    fn from(c: svgtypes::Color) -> Self {
        Color {
            red: c.red,
            green: c.green,
            blue: c.blue,
            alpha: c.alpha,
        }
    }
}

/// Parses a color literal.
///
/// Supports `#rgb`, `#rrggbb`, `rgb(r, g, b)` with integer or percentage
/// components and named colors.
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();
    if !is_tiny_color(text) {
        return None;
    }

    svgtypes::Color::from_str(text).ok().map(Color::from)
}

/// Looks up a color keyword, like `red` or `cornflowerblue`.
pub fn named_color(name: &str) -> Option<Color> {
    if !is_color_keyword(name) {
        return None;
    }

    svgtypes::Color::from_str(name).ok().map(Color::from)
}

// SVG Tiny has no alpha forms and no `hsl()`.
fn is_tiny_color(text: &str) -> bool {
    if let Some(hex) = text.strip_prefix('#') {
        matches!(hex.len(), 3 | 6)
    } else if let Some(inner) = text.strip_prefix("rgb(") {
        inner.split(',').count() == 3
    } else {
        is_color_keyword(text)
    }
}

#[inline]
fn is_color_keyword(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|c| c.is_ascii_alphabetic())
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $color:expr) => (
            #[test]
            fn $name() {
                assert_eq!(parse_color($text), $color);
            }
        )
    }

    test!(hex_short, "#0f0", Some(Color::new_rgb(0, 255, 0)));
    test!(hex_long, "#00ff00", Some(Color::new_rgb(0, 255, 0)));
    test!(hex_upper, "#FF8000", Some(Color::new_rgb(255, 128, 0)));
    test!(hex_invalid_len, "#ff00", None);
    test!(hex_invalid_digit, "#ggg", None);
    test!(rgb_int, "rgb(10, 20, 30)", Some(Color::new_rgb(10, 20, 30)));
    test!(rgb_percent, "rgb(50%,0%,100%)", Some(Color::new_rgb(128, 0, 255)));
    test!(rgb_clamped, "rgb(300, -5, 120)", Some(Color::new_rgb(255, 0, 120)));
    test!(rgb_percent_clamped, "rgb(120%, -5%, 50%)", Some(Color::new_rgb(255, 0, 128)));
    test!(rgb_two_channels, "rgb(1, 2)", None);
    test!(rgb_four_channels, "rgb(1, 2, 3, 4)", None);
    test!(rgba, "rgba(1, 2, 3, 0.5)", None);
    test!(hsl, "hsl(120, 100%, 50%)", None);
    test!(hex_with_alpha, "#00ff0080", None);
    test!(named, "red", Some(Color::new_rgb(255, 0, 0)));
    test!(named_long, "cornflowerblue", Some(Color::new_rgb(100, 149, 237)));
    test!(unknown_name, "unknown", None);
    test!(current_color, "currentColor", None);
    test!(url, "url(#lg1)", None);

    #[test]
    fn hex_shorthand_equals_full_form() {
        assert_eq!(parse_color("#0f0").map(|c| c.to_argb()),
                   parse_color("#00ff00").map(|c| c.to_argb()));
    }

    #[test]
    fn argb() {
        assert_eq!(Color::new_rgb(0x12, 0x34, 0x56).to_argb(), 0xff123456);
        assert_eq!(Color::black().to_argb(), 0xff000000);
    }
}
