//! Editing session: the profile store plus styling, logo and the last
//! generated surface, driven through explicit commands.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tracing::{error, info, warn};

use crate::compose::{overlay_logo, textured_preview, Texture};
use crate::encoder::encode;
use crate::error::{ExportError, GenerateError, StoreError};
use crate::helper::{png_bytes, render, save_png, RenderOptions, DEFAULT_FILE_NAME};
use crate::logo::{spawn_load, PendingLogo};
use crate::profile::ProfileKind;
use crate::store::ProfileStore;

/// Visual settings applied on the next generate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Style {
    pub render: RenderOptions,
    pub texture: Texture,
}

/// Outcome of a successful generate.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generated {
    pub profile: ProfileKind,
    pub payload: String,
    /// Short caption for display, e.g. `QR Code generated for: wifi`.
    pub description: String,
    pub with_logo: bool,
}

#[derive(Debug)]
struct Surface {
    image: RgbaImage,
    profile: ProfileKind,
}

#[derive(Debug, Default)]
enum LogoSlot {
    #[default]
    Empty,
    Pending(PendingLogo),
    Ready(RgbaImage),
}

#[derive(Debug, Default)]
pub struct Session {
    store: ProfileStore,
    style: Style,
    logo: LogoSlot,
    surface: Option<Surface>,
}

impl Session {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn on_select_profile(&mut self, profile: ProfileKind) {
        self.store.set_active_profile(profile);
    }

    pub fn on_field_edit(&mut self, profile: ProfileKind, field: &str, value: &str) -> Result<(), StoreError> {
        self.store.set_field(profile, field, value)
    }

    pub fn on_color_change(&mut self, dark: Rgba<u8>) {
        self.style.render.dark = dark;
    }

    pub fn on_texture_select(&mut self, texture: Texture) {
        self.style.texture = texture;
    }

    /// Starts loading a logo in the background, or clears it with `None`.
    ///
    /// Must be called within a tokio runtime when a path is given.
    pub fn on_logo_selected(&mut self, path: Option<PathBuf>) {
        self.logo = match path {
            Some(path) => {
                info!(path = %path.display(), "loading logo");
                LogoSlot::Pending(spawn_load(path))
            }
            None => LogoSlot::Empty,
        };
    }

    /// Encodes the active profile, renders it and, once the surface exists,
    /// composites the logo if one was selected.
    ///
    /// On failure the previous surface is kept and all input is preserved.
    pub async fn on_generate(&mut self) -> Result<Generated, GenerateError> {
        let profile = self.store.active();
        let payload = encode(profile, self.store.fields()).inspect_err(|err| {
            warn!(profile = %profile, reason = %err, "validation failed");
        })?;
        if payload.is_empty() {
            warn!(profile = %profile, "nothing to encode");
            return Err(GenerateError::EmptyPayload);
        }

        let mut image = render(&payload, &self.style.render)?;
        let with_logo = match self.resolve_logo().await {
            Some(logo) => {
                overlay_logo(&mut image, logo);
                true
            }
            None => false,
        };

        info!(profile = %profile, bytes = payload.len(), with_logo, "QR code generated");
        self.surface = Some(Surface { image, profile });
        Ok(Generated {
            profile,
            payload,
            description: format!("QR Code generated for: {profile}"),
            with_logo,
        })
    }

    /// Waits for a pending logo. A logo that fails to load is dropped with a
    /// warning and the code is generated without it.
    async fn resolve_logo(&mut self) -> Option<&RgbaImage> {
        // A loaded logo stays in the slot for every later generate.
        self.logo = match std::mem::take(&mut self.logo) {
            LogoSlot::Pending(pending) => {
                let path = pending.path().to_path_buf();
                match pending.wait().await {
                    Ok(logo) => LogoSlot::Ready(logo),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "logo unavailable, generating without it");
                        LogoSlot::Empty
                    }
                }
            }
            settled => settled,
        };
        match &self.logo {
            LogoSlot::Ready(logo) => Some(logo),
            _ => None,
        }
    }

    /// The last generated surface, as exported.
    pub fn surface(&self) -> Option<&RgbaImage> {
        self.surface.as_ref().map(|s| &s.image)
    }

    /// Profile of the last generated surface.
    pub fn surface_profile(&self) -> Option<ProfileKind> {
        self.surface.as_ref().map(|s| s.profile)
    }

    /// The last surface over the selected texture.
    pub fn preview(&self) -> Option<RgbaImage> {
        self.surface().map(|img| textured_preview(img, self.style.texture))
    }

    pub fn png(&self) -> Result<Vec<u8>, ExportError> {
        Ok(png_bytes(self.current_surface()?)?)
    }

    /// Writes the last surface to `directory/qrcode.png`.
    pub fn download(&self, directory: &Path) -> Result<PathBuf, ExportError> {
        self.download_as(directory, DEFAULT_FILE_NAME)
    }

    pub fn download_as(&self, directory: &Path, filename: &str) -> Result<PathBuf, ExportError> {
        save_png(self.current_surface()?, directory, filename)
    }

    fn current_surface(&self) -> Result<&RgbaImage, ExportError> {
        self.surface().ok_or_else(|| {
            error!("download requested before any QR code was generated");
            ExportError::NoSurface
        })
    }
}
