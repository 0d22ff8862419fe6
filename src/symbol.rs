//! QR symbol generation.
//!
//! Module placement and error correction are delegated to the `qrcode`
//! crate; this module wraps its output in a [`Matrix`] that the renderers in
//! [`crate::helper`] read module by module.
use std::fmt;
use std::str::FromStr;

use qrcode::{Color, EcLevel, QrCode};

use crate::error::{RenderError, StoreError};

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords. Needed when a logo covers the center.
    #[default]
    High,
}

impl QrCodeEcc {
    fn ec_level(self) -> EcLevel {
        use QrCodeEcc::*;
        match self {
            Low => EcLevel::L,
            Medium => EcLevel::M,
            Quartile => EcLevel::Q,
            High => EcLevel::H,
        }
    }

    pub fn as_str(self) -> &'static str {
        use QrCodeEcc::*;
        match self {
            Low => "low",
            Medium => "medium",
            Quartile => "quartile",
            High => "high",
        }
    }
}

impl fmt::Display for QrCodeEcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrCodeEcc {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use QrCodeEcc::*;
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Low),
            "m" | "medium" => Ok(Medium),
            "q" | "quartile" => Ok(Quartile),
            "h" | "high" => Ok(High),
            _ => Err(StoreError::UnknownEcc(s.to_string())),
        }
    }
}

/// A square grid of dark and light modules, without quiet zone.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Matrix {
    size: i32,
    modules: Vec<bool>,
}

impl Matrix {
    /// Encodes `payload` at the given error correction level, picking the
    /// smallest version that fits.
    pub fn encode(payload: &str, ecc: QrCodeEcc) -> Result<Self, RenderError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ecc.ec_level())?;
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Ok(Self {
            size: code.width() as i32,
            modules,
        })
    }

    /// Width and height in modules, between 21 and 177.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns the color of the module at `(x, y)`; `false` (light) for
    /// anything outside the grid, so quiet zones need no special casing.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.modules[(y * self.size + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_size_grows_with_payload() {
        let small = Matrix::encode("HELLO", QrCodeEcc::Low).unwrap();
        assert_eq!(small.size(), 21);
        let large = Matrix::encode(&"x".repeat(300), QrCodeEcc::High).unwrap();
        assert!(large.size() > small.size());
    }

    #[test]
    fn test_finder_corner_is_dark_and_outside_is_light() {
        let qr = Matrix::encode("https://example.com", QrCodeEcc::High).unwrap();
        assert!(qr.get_module(0, 0));
        assert!(!qr.get_module(-1, 0));
        assert!(!qr.get_module(qr.size(), qr.size()));
    }

    #[test]
    fn test_payload_too_long() {
        let too_long = "x".repeat(4000);
        assert!(matches!(
            Matrix::encode(&too_long, QrCodeEcc::High),
            Err(RenderError::Symbol(_))
        ));
    }

    #[test]
    fn test_parse_ecc() {
        assert_eq!("H".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::High);
        assert_eq!("quartile".parse::<QrCodeEcc>().unwrap(), QrCodeEcc::Quartile);
        assert!("max".parse::<QrCodeEcc>().is_err());
    }
}
