use crate::color::{to_hex, DEFAULT_DARK, TRANSPARENT};
use crate::error::{ExportError, RenderError};
use crate::symbol::{Matrix, QrCodeEcc};

use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name offered for downloads.
pub const DEFAULT_FILE_NAME: &str = "qrcode.png";

/// How a payload is turned into a raster surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderOptions {
    /// Width and height of the surface in pixels.
    pub size: u32,
    pub dark: Rgba<u8>,
    /// May be fully transparent.
    pub light: Rgba<u8>,
    pub ecc: QrCodeEcc,
    /// Light border around the symbol, in modules.
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 256,
            dark: DEFAULT_DARK,
            light: TRANSPARENT,
            ecc: QrCodeEcc::High,
            quiet_zone: 4,
        }
    }
}

/*---- Utilities ----*/

// Returns a string of SVG code for an image depicting
// the given QR Code, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &Matrix, border: u32, dark: Rgba<u8>, light: Rgba<u8>) -> String {
    let border = border as i32;
    let dimension = qr.size() + border * 2;
    let opacity = |c: Rgba<u8>| f32::from(c[3]) / 255.0;

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    if light[3] > 0 {
        result += &format!(
            "\t<rect width=\"100%\" height=\"100%\" fill=\"{}\" fill-opacity=\"{:.3}\"/>\n",
            to_hex(light),
            opacity(light)
        );
    }
    let mut path = Vec::new();
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                path.push(format!("M{},{}h1v1h-1z", x + border, y + border));
            }
        }
    }
    result += &format!(
        "\t<path d=\"{}\" fill=\"{}\" fill-opacity=\"{:.3}\"/>\n",
        path.join(" "),
        to_hex(dark),
        opacity(dark)
    );
    result += "</svg>\n";
    result
}

/// Renders the given matrix as block characters for a terminal, two
/// columns per module so it keeps its aspect ratio.
pub fn to_terminal_string(qr: &Matrix, border: u32) -> String {
    let border = border as i32;
    let mut out = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c = if qr.get_module(x, y) { '█' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Rasterizes a matrix into an RGBA surface of exactly `options.size`
/// pixels square. Modules are sampled nearest-neighbour, so they may differ
/// by one pixel in width when the size is not a multiple of the module count.
pub fn rasterize(qr: &Matrix, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
    if options.size == 0 {
        return Err(RenderError::InvalidSize);
    }
    let border = options.quiet_zone as i64;
    let total = qr.size() as i64 + 2 * border;
    let size = i64::from(options.size);

    let mut img = RgbaImage::new(options.size, options.size);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (i64::from(x) * total / size - border) as i32;
        let qr_y = (i64::from(y) * total / size - border) as i32;
        *pixel = if qr.get_module(qr_x, qr_y) {
            options.dark
        } else {
            options.light
        };
    }
    Ok(img)
}

/// The rendering capability: payload in, raster surface out.
///
/// # Example
///
/// ```rust
/// use qrcraft::helper::{render, RenderOptions};
///
/// let surface = render("https://example.com", &RenderOptions::default()).unwrap();
/// assert_eq!(surface.dimensions(), (256, 256));
/// ```
pub fn render(payload: &str, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
    let qr = Matrix::encode(payload, options.ecc)?;
    rasterize(&qr, options)
}

/// Encodes a surface as PNG.
pub fn png_bytes(img: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Saves a surface as PNG under `directory`, creating it if needed.
///
/// Returns the path of the written file.
pub fn save_png(img: &RgbaImage, directory: &Path, filename: &str) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        fs::create_dir_all(directory)?;
    }
    let file_path = directory.join(filename);
    fs::write(&file_path, png_bytes(img)?)?;
    info!(path = %file_path.display(), "saved QR code");
    Ok(file_path)
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn low_ecc() -> RenderOptions {
        RenderOptions {
            ecc: QrCodeEcc::Low,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_to_svg_string() {
        let qr = Matrix::encode("HELLO WORLD", QrCodeEcc::Low).unwrap();
        let svg = to_svg_string(&qr, 4, DEFAULT_DARK, TRANSPARENT);

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("viewBox=\"0 0 29 29\""));
        assert!(svg.contains("fill=\"#1a56db\""));
        // Transparent background: no backing rect.
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_to_terminal_string() {
        let qr = Matrix::encode("HELLO", QrCodeEcc::Low).unwrap();
        let text = to_terminal_string(&qr, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 23);
        assert!(lines.iter().all(|l| l.chars().count() == 46));
    }

    #[test]
    fn test_render_dimensions() {
        let img = render("Hello, world!", &RenderOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (256, 256));

        let img = render("Hello, world!", &RenderOptions { size: 100, ..low_ecc() }).unwrap();
        assert_eq!(img.dimensions(), (100, 100));
    }

    #[test]
    fn test_render_modules_land_on_expected_pixels() {
        // Version 1 plus a 4 module quiet zone: 29 modules over 256 px.
        let img = render("HELLO", &low_ecc()).unwrap();
        assert_eq!(*img.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*img.get_pixel(40, 40), DEFAULT_DARK); // finder outer ring
        assert_eq!(*img.get_pixel(48, 48), TRANSPARENT); // finder inner ring
        assert_eq!(*img.get_pixel(66, 66), DEFAULT_DARK); // finder center
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let opts = RenderOptions { size: 0, ..RenderOptions::default() };
        assert!(matches!(render("x", &opts), Err(RenderError::InvalidSize)));
    }

    #[test]
    fn test_png_bytes_and_save() {
        let img = render("https://example.com", &RenderOptions::default()).unwrap();
        let bytes = png_bytes(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("generated");
        let path = save_png(&img, &nested, DEFAULT_FILE_NAME).unwrap();
        assert_eq!(path, nested.join("qrcode.png"));
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded, img);
    }
}
