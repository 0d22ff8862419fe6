//! Post-render composition: the centered logo overlay and the decorative
//! texture backdrop used for previews.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::color::WHITE;
use crate::error::StoreError;

/// Logo side as a fraction of the surface side.
const LOGO_SCALE: f32 = 0.18;
/// Extra room between the logo corners and the edge of its white backing.
const LOGO_MARGIN: f32 = 10.0;
const LOGO_RING: Rgba<u8> = Rgba([0xdd, 0xdd, 0xdd, 0xff]);

const TEXTURE_TILE: u32 = 20;
const TEXTURE_INK: Rgba<u8> = Rgba([0xe2, 0xe8, 0xf0, 0xff]);
const STAR: [(f32, f32); 10] = [
    (10.0, 2.0),
    (12.5, 7.5),
    (18.0, 7.5),
    (14.0, 11.5),
    (15.5, 17.0),
    (10.0, 14.0),
    (4.5, 17.0),
    (6.0, 11.5),
    (2.0, 7.5),
    (7.5, 7.5),
];

/// Decorative pattern drawn behind the code in previews.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Texture {
    #[default]
    None,
    Dots,
    Square,
    Star,
}

impl Texture {
    pub fn as_str(self) -> &'static str {
        match self {
            Texture::None => "none",
            Texture::Dots => "dots",
            Texture::Square => "square",
            Texture::Star => "star",
        }
    }

    /// Whether pixel `(x, y)` of a 20x20 tile is inked. Sampled at pixel centers.
    fn inked(self, x: u32, y: u32) -> bool {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        match self {
            Texture::None => false,
            Texture::Dots => (px - 10.0).powi(2) + (py - 10.0).powi(2) <= 4.0,
            Texture::Square => (6.0..14.0).contains(&px) && (6.0..14.0).contains(&py),
            Texture::Star => inside_polygon(&STAR, px, py),
        }
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Texture {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Texture::None),
            "dots" => Ok(Texture::Dots),
            "square" => Ok(Texture::Square),
            "star" => Ok(Texture::Star),
            _ => Err(StoreError::UnknownTexture(s.to_string())),
        }
    }
}

// Even-odd ray casting.
fn inside_polygon(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Draws `logo` on the center of `surface`: first a white disc with a thin
/// grey outline, then the logo scaled to 18% of the surface.
///
/// Must run on a finished surface; it paints over whatever modules are there.
pub fn overlay_logo(surface: &mut RgbaImage, logo: &RgbaImage) {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let logo_w = ((width as f32 * LOGO_SCALE).round() as u32).max(1);
    let logo_h = ((height as f32 * LOGO_SCALE).round() as u32).max(1);

    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let half_diagonal = (logo_w as f32).hypot(logo_h as f32) / 2.0;
    let radius = half_diagonal + LOGO_MARGIN;

    for (x, y, pixel) in surface.enumerate_pixels_mut() {
        let d = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy);
        if d <= radius - 0.5 {
            *pixel = WHITE;
        } else if d <= radius + 0.5 {
            *pixel = LOGO_RING;
        }
    }

    let scaled = imageops::resize(logo, logo_w, logo_h, FilterType::Lanczos3);
    let x = i64::from((width - logo_w) / 2);
    let y = i64::from((height - logo_h) / 2);
    imageops::overlay(surface, &scaled, x, y);
}

/// Lays `surface` over a white backdrop tiled with `texture`, centered the
/// same way a repeating CSS background would be.
pub fn textured_preview(surface: &RgbaImage, texture: Texture) -> RgbaImage {
    let (width, height) = surface.dimensions();
    // Offsets that put a tile center on the surface center.
    let ox = (width / 2 + TEXTURE_TILE - TEXTURE_TILE / 2) % TEXTURE_TILE;
    let oy = (height / 2 + TEXTURE_TILE - TEXTURE_TILE / 2) % TEXTURE_TILE;

    let mut backdrop = RgbaImage::from_pixel(width, height, WHITE);
    if texture != Texture::None {
        for (x, y, pixel) in backdrop.enumerate_pixels_mut() {
            let tx = (x + TEXTURE_TILE - ox) % TEXTURE_TILE;
            let ty = (y + TEXTURE_TILE - oy) % TEXTURE_TILE;
            if texture.inked(tx, ty) {
                *pixel = TEXTURE_INK;
            }
        }
    }
    imageops::overlay(&mut backdrop, surface, 0, 0);
    backdrop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TRANSPARENT;

    #[test]
    fn test_parse_texture() {
        assert_eq!("Dots".parse::<Texture>().unwrap(), Texture::Dots);
        assert_eq!("none".parse::<Texture>().unwrap(), Texture::None);
        assert!("plaid".parse::<Texture>().is_err());
    }

    #[test]
    fn test_tile_shapes() {
        assert!(Texture::Dots.inked(10, 10));
        assert!(!Texture::Dots.inked(0, 0));
        assert!(Texture::Square.inked(6, 13));
        assert!(!Texture::Square.inked(14, 10));
        assert!(Texture::Star.inked(10, 10));
        assert!(!Texture::Star.inked(1, 1));
        assert!(!Texture::None.inked(10, 10));
    }

    #[test]
    fn test_overlay_logo_centers_logo_on_white_disc() {
        let mut surface = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        let logo = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        overlay_logo(&mut surface, &logo);

        // Logo is 36x36 at (82, 82); disc radius is ~35.5.
        assert_eq!(*surface.get_pixel(100, 100), Rgba([255, 0, 0, 255]));
        assert_eq!(*surface.get_pixel(100, 70), WHITE);
        assert_eq!(*surface.get_pixel(100, 40), Rgba([0, 0, 0, 255]));
        assert_eq!(*surface.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_overlay_logo_on_empty_surface_is_a_no_op() {
        let logo = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let mut empty = RgbaImage::new(0, 0);
        overlay_logo(&mut empty, &logo);
        assert_eq!(empty.dimensions(), (0, 0));

        let mut flat = RgbaImage::new(0, 30);
        overlay_logo(&mut flat, &logo);
        assert_eq!(flat.dimensions(), (0, 30));
    }

    #[test]
    fn test_textured_preview_shows_through_transparent_pixels() {
        let mut surface = RgbaImage::from_pixel(40, 40, TRANSPARENT);
        surface.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        let preview = textured_preview(&surface, Texture::Dots);

        assert_eq!(*preview.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*preview.get_pixel(20, 20), TEXTURE_INK);
        assert_eq!(*preview.get_pixel(5, 5), WHITE);

        let plain = textured_preview(&surface, Texture::None);
        assert_eq!(*plain.get_pixel(20, 20), WHITE);
    }
}
