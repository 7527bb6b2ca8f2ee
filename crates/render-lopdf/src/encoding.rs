//! Text encoding for the standard Type1 fonts (WinAnsiEncoding).

use invoice_render_core::RenderError;
use serde::{Deserialize, Serialize};

/// What to do with characters the standard fonts cannot show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphPolicy {
    /// Substitute `?` and log a warning.
    #[default]
    Replace,
    /// Fail the render with an encoding error.
    Strict,
}

/// Characters with no WinAnsi code point that have a conventional Latin spelling.
fn transliterate(c: char) -> Option<&'static [u8]> {
    match c {
        '₹' => Some(b"Rs."),
        _ => None,
    }
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            '\t' => b' ',
            _ => return None,
        }),
    }
}

pub fn encode_win_ansi(text: &str, policy: GlyphPolicy) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::with_capacity(text.len());
    let mut replaced = 0usize;
    for c in text.chars() {
        if let Some(byte) = win_ansi_byte(c) {
            out.push(byte);
        } else if let Some(bytes) = transliterate(c) {
            out.extend_from_slice(bytes);
        } else {
            match policy {
                GlyphPolicy::Strict => {
                    return Err(RenderError::Encoding(format!(
                        "glyph '{}' (U+{:04X}) has no WinAnsi encoding",
                        c, c as u32
                    )));
                }
                GlyphPolicy::Replace => {
                    out.push(b'?');
                    replaced += 1;
                }
            }
        }
    }
    if replaced > 0 {
        log::warn!(
            "Replaced {} unencodable glyph(s) in text run {:?}",
            replaced,
            text
        );
    }
    Ok(out)
}
