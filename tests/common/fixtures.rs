use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use vtm_invoice::{
    InvoiceDocument, InvoiceLine, InvoiceRenderer, RasterAsset, RendererConfig, ScriptFontPaths, Timestamp,
};

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap()
}

/// The three-line event invoice totalling 10000.
pub fn event_invoice() -> InvoiceDocument {
    InvoiceDocument::new("VTM-2026-001", "Asha Rao")
        .with_line(InvoiceLine::new("Stage Decoration", 1, 5000))
        .with_line(InvoiceLine::new("Sound System Setup", 1, 3000))
        .with_line(InvoiceLine::new("Lighting Arrangement", 1, 2000))
        .with_footer("Call us: 98450 00000")
}

/// Uncompressed output with no script fonts, so runs never depend on
/// what the host has installed.
pub fn config_plain() -> RendererConfig {
    RendererConfig {
        compress_streams: false,
        system_fonts: false,
        ..RendererConfig::default()
    }
}

/// A TrueType font mapping the Kannada and Devanagari blocks to box glyphs.
pub fn test_font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/VtmIndicTest.ttf")
}

/// [`fixed_renderer`] with the test font configured for both scripts.
pub fn script_font_renderer() -> InvoiceRenderer {
    InvoiceRenderer::builder()
        .with_config(RendererConfig {
            fonts: ScriptFontPaths {
                kannada: Some(test_font_path()),
                devanagari: Some(test_font_path()),
            },
            ..config_plain()
        })
        .with_timestamp(Timestamp::Fixed(fixed_instant()))
        .build()
        .unwrap()
}

pub fn fixed_renderer() -> InvoiceRenderer {
    InvoiceRenderer::builder()
        .with_config(config_plain())
        .with_timestamp(Timestamp::Fixed(fixed_instant()))
        .build()
        .unwrap()
}

/// A dark ink stroke on a transparent background.
pub fn signature() -> RasterAsset {
    let (width, height) = (280u32, 80u32);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let ink = (y as i32 - 40).abs() < 4 || (x / 20) % 3 == 0 && (y > 20 && y < 60);
            pixels.extend_from_slice(if ink { &[20, 20, 90, 255] } else { &[0, 0, 0, 0] });
        }
    }
    RasterAsset::from_rgba(width, height, pixels).unwrap()
}
