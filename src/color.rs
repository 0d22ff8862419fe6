//! Hex color parsing for the dark/light module colors.

use image::Rgba;

use crate::error::ColorError;

/// Default dark module color.
pub const DEFAULT_DARK: Rgba<u8> = Rgba([0x1a, 0x56, 0xdb, 0xff]);

/// Fully transparent, the default light module color.
pub const TRANSPARENT: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0x00]);

pub const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
pub fn parse_color(input: &str) -> Result<Rgba<u8>, ColorError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("transparent") {
        return Ok(TRANSPARENT);
    }
    let err = || ColorError(input.to_string());
    let hex = trimmed.strip_prefix('#').ok_or_else(err)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
    match hex.len() {
        3 => {
            let mut rgba = [0xff; 4];
            for (slot, digit) in rgba.iter_mut().zip(hex.bytes()) {
                let nibble = (digit as char).to_digit(16).ok_or_else(err)? as u8;
                *slot = nibble * 0x11;
            }
            Ok(Rgba(rgba))
        }
        6 => Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 0xff])),
        8 => Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => Err(err()),
    }
}

/// Formats a color as `#rrggbb`, ignoring alpha.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, _] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#1a56db").unwrap(), DEFAULT_DARK);
        assert_eq!(parse_color("#FFF").unwrap(), WHITE);
        assert_eq!(parse_color("#00000080").unwrap(), Rgba([0, 0, 0, 0x80]));
        assert_eq!(parse_color(" Transparent ").unwrap()[3], 0);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        for bad in ["1a56db", "#12345", "#gggggg", "blue", "#"] {
            assert!(parse_color(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(DEFAULT_DARK), "#1a56db");
    }
}
