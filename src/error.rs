//! Error types for every stage of building a QR code: editing fields,
//! encoding a payload, rendering it, loading a logo and exporting the result.

use thiserror::Error;

/// A payload could not be built from the current field values.
///
/// The `Display` text is the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("SSID required")]
    SsidRequired,

    #[error("phone number required")]
    PhoneNumberRequired,

    #[error("latitude and longitude required")]
    CoordinatesRequired,

    #[error("title and start time required")]
    TitleAndStartRequired,

    #[error("platform and username required")]
    PlatformAndUsernameRequired,

    /// `field` is either `"start"` or `"end"`.
    #[error("invalid {field} time: {value}")]
    InvalidDateTime { field: &'static str, value: String },
}

impl ValidationError {
    /// Human-readable reason, as surfaced to the user.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Editing the profile store failed. Stored values are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("profile '{profile}' has no field named '{field}'")]
    UnknownField { profile: &'static str, field: String },

    #[error("invalid Wi-Fi encryption '{0}' (expected WPA, WEP or none)")]
    InvalidEncryption(String),

    #[error("unknown texture: {0}")]
    UnknownTexture(String),

    #[error("unknown error correction level: {0}")]
    UnknownEcc(String),
}

/// A color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}' (expected #rgb, #rrggbb, #rrggbbaa or transparent)")]
pub struct ColorError(pub String);

/// The rendering capability rejected its input.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("QR symbol error: {0}")]
    Symbol(#[from] qrcode::types::QrError),

    #[error("surface size must be greater than zero")]
    InvalidSize,
}

/// The logo image could not be loaded. Never blocks generation.
#[derive(Debug, Error)]
pub enum LogoError {
    #[error("failed to read logo file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode logo image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("logo loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A generate request was aborted.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("please fill in content to generate the QR code")]
    EmptyPayload,

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The current surface could not be exported.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no QR code generated to download")]
    NoSurface,

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
