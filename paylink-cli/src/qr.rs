//! Terminal QR rendering.

use qrcode::render::unicode::Dense1x2;
use qrcode::{EcLevel, QrCode};

/// Renders `text` as a unicode-block QR code suitable for a terminal.
///
/// # Errors
///
/// Returns [`qrcode::types::QrError`] when the payload exceeds QR
/// capacity.
pub fn render(text: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::with_error_correction_level(text, EcLevel::M)?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Dark)
        .light_color(Dense1x2::Light)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_payment_url() {
        let qr = render("ethereum:0x742e1E5e0adf53Cbb81D725d5a8b2cD5B10B5E2F?value=1").unwrap();
        assert!(!qr.is_empty());
        assert!(qr.lines().count() > 10);
    }
}
