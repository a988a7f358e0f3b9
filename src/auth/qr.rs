//! QR rendering for the TOTP provisioning URI.
//!
//! The enrollment endpoint answers with `image/png` only; the raw secret is
//! never echoed in a JSON body next to the image.

use anyhow::{Context, Result};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

pub const DEFAULT_SCALE: u32 = 5;

/// Render `data` as a PNG QR code with `scale` pixels per module.
///
/// # Errors
///
/// Returns an error if the payload does not fit a QR code or PNG encoding
/// fails.
pub fn render_png(data: &str, scale: u32) -> Result<Vec<u8>> {
    let code = QrCode::new(data.as_bytes()).context("failed to build QR code")?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(scale, scale)
        .build();

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .context("failed to encode QR code as PNG")?;
    Ok(png.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    // Image width from the PNG IHDR chunk (big-endian u32 at offset 16).
    fn png_width(png: &[u8]) -> u32 {
        u32::from_be_bytes([png[16], png[17], png[18], png[19]])
    }

    #[test]
    fn renders_a_png() {
        let png = render_png("otpauth://totp/Ingreso:a@example.com?secret=X", 5).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn scale_controls_module_size() {
        let uri = "otpauth://totp/Ingreso:a@example.com?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
        let small = render_png(uri, 1).unwrap();
        let large = render_png(uri, 2).unwrap();
        assert_eq!(png_width(&large), 2 * png_width(&small));
    }
}
