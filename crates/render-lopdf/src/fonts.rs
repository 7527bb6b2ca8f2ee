//! Embedded script fonts and standard-font metrics.
//!
//! Latin text is set in the standard Helvetica faces. Kannada and Devanagari
//! runs are shaped with `rustybuzz` and shown through a Type0 font that
//! embeds the TrueType program of a [`ScriptFont`].

use crate::encoding::GlyphPolicy;
use invoice_render_core::RenderError;
use invoice_types::AssetError;
use rustybuzz::{Face, UnicodeBuffer};
use std::collections::BTreeMap;
use std::sync::Arc;
use ttf_parser::{GlyphId, name_id};

/// Scripts that need an embedded font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Script {
    Kannada,
    Devanagari,
}

impl Script {
    pub const ALL: [Script; 2] = [Script::Kannada, Script::Devanagari];

    pub fn of(c: char) -> Option<Script> {
        match c as u32 {
            0x0C80..=0x0CFF => Some(Script::Kannada),
            0x0900..=0x097F | 0xA8E0..=0xA8FF | 0x1CD0..=0x1CFF => Some(Script::Devanagari),
            _ => None,
        }
    }

    /// A letter every usable font for the script must cover.
    fn probe_char(self) -> char {
        match self {
            Script::Kannada => '\u{0C95}',
            Script::Devanagari => '\u{0915}',
        }
    }

    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            Script::Kannada => "F3",
            Script::Devanagari => "F4",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Script::Kannada => "Kannada",
            Script::Devanagari => "Devanagari",
        }
    }
}

/// A TrueType font covering one script.
pub struct ScriptFont {
    script: Script,
    data: Arc<Vec<u8>>,
    index: u32,
    postscript_name: String,
}

impl std::fmt::Debug for ScriptFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptFont")
            .field("script", &self.script)
            .field("postscript_name", &self.postscript_name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl ScriptFont {
    /// Parses `data` and checks that face `index` covers `script`.
    pub fn from_bytes(script: Script, data: Vec<u8>, index: u32) -> Result<Self, AssetError> {
        let face = ttf_parser::Face::parse(&data, index).map_err(|e| AssetError::Font(e.to_string()))?;
        if face.glyph_index(script.probe_char()).is_none() {
            return Err(AssetError::Font(format!(
                "font has no {} glyphs",
                script.as_str()
            )));
        }
        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| {
                name.chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                    .collect::<String>()
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("VTM{}", script.as_str()));

        Ok(Self {
            script,
            data: Arc::new(data),
            index,
            postscript_name,
        })
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn metrics(&self) -> Result<FontMetrics, RenderError> {
        let face = ttf_parser::Face::parse(&self.data, self.index)
            .map_err(|e| RenderError::Asset(AssetError::Font(e.to_string())))?;
        let scale = 1000.0 / f32::from(face.units_per_em());
        let bbox = face.global_bounding_box();
        Ok(FontMetrics {
            bbox: [
                f32::from(bbox.x_min) * scale,
                f32::from(bbox.y_min) * scale,
                f32::from(bbox.x_max) * scale,
                f32::from(bbox.y_max) * scale,
            ],
            ascent: f32::from(face.ascender()) * scale,
            descent: f32::from(face.descender()) * scale,
            cap_height: f32::from(face.capital_height().unwrap_or(face.ascender())) * scale,
        })
    }

    /// Shapes a single-script run.
    pub fn shape(&self, text: &str) -> Result<ShapedRun, RenderError> {
        let face = Face::from_slice(&self.data, self.index)
            .ok_or_else(|| RenderError::Asset(AssetError::Font(self.postscript_name.clone())))?;
        let scale = 1000.0 / face.units_per_em() as f32;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let output = rustybuzz::shape(&face, &[], buffer);
        let infos = output.glyph_infos();
        let positions = output.glyph_positions();

        let mut starts: Vec<usize> = infos.iter().map(|info| info.cluster as usize).collect();
        starts.sort_unstable();
        starts.dedup();
        let cluster_text = |start: usize| {
            let end = starts
                .iter()
                .copied()
                .find(|&s| s > start)
                .unwrap_or(text.len());
            text.get(start..end).unwrap_or("")
        };

        let mut glyphs = Vec::with_capacity(infos.len());
        let mut seen_clusters = Vec::new();
        for (info, pos) in infos.iter().zip(positions) {
            let id = u16::try_from(info.glyph_id).unwrap_or(0);
            let start = info.cluster as usize;
            let cluster = cluster_text(start);
            let first_in_cluster = !seen_clusters.contains(&start);
            if first_in_cluster {
                seen_clusters.push(start);
            }
            // Prefer the character that maps straight to this glyph; ligatures
            // and conjuncts carry the whole cluster on their first glyph.
            let unicode = cluster
                .chars()
                .find(|&c| face.glyph_index(c) == Some(GlyphId(id)))
                .map(String::from)
                .unwrap_or_else(|| if first_in_cluster { cluster.to_string() } else { String::new() });

            glyphs.push(ShapedGlyph {
                id,
                x_advance: pos.x_advance as f32 * scale,
                x_offset: pos.x_offset as f32 * scale,
                y_offset: pos.y_offset as f32 * scale,
                width: (f32::from(face.glyph_hor_advance(GlyphId(id)).unwrap_or(0)) * scale).round(),
                unicode,
                cluster: cluster.to_string(),
            });
        }
        Ok(ShapedRun { glyphs })
    }
}

pub(crate) struct FontMetrics {
    pub bbox: [f32; 4],
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
}

/// One positioned glyph. Lengths are in thousandths of an em.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedGlyph {
    pub id: u16,
    pub x_advance: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    /// The unshaped advance, as written to the font's `/W` array.
    pub width: f32,
    /// Text this glyph stands for in the `/ToUnicode` map.
    pub unicode: String,
    pub cluster: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
}

impl ShapedRun {
    /// Total advance in thousandths of an em.
    pub fn advance(&self) -> f32 {
        self.glyphs.iter().map(|g| g.x_advance).sum()
    }

    /// Fails under the strict policy when any glyph is `.notdef`.
    pub(crate) fn check_coverage(&self, font: &ScriptFont, policy: GlyphPolicy) -> Result<(), RenderError> {
        let missing: Vec<&str> = self
            .glyphs
            .iter()
            .filter(|g| g.id == 0)
            .map(|g| g.cluster.as_str())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        match policy {
            GlyphPolicy::Strict => Err(RenderError::Encoding(format!(
                "font {} has no glyph for {:?}",
                font.postscript_name(),
                missing
            ))),
            GlyphPolicy::Replace => {
                log::warn!(
                    "Font {} is missing {} glyph(s): {:?}",
                    font.postscript_name(),
                    missing.len(),
                    missing
                );
                Ok(())
            }
        }
    }
}

/// The script fonts available to a canvas.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    fonts: BTreeMap<Script, Arc<ScriptFont>>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: ScriptFont) -> Self {
        self.insert(font);
        self
    }

    pub fn insert(&mut self, font: ScriptFont) {
        self.fonts.insert(font.script(), Arc::new(font));
    }

    pub fn get(&self, script: Script) -> Option<&Arc<ScriptFont>> {
        self.fonts.get(&script)
    }

    pub fn contains(&self, script: Script) -> bool {
        self.fonts.contains_key(&script)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// A stretch of text drawn with one font. `script` is `None` for the
/// standard Helvetica faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegment<'t> {
    pub script: Option<Script>,
    pub text: &'t str,
}

fn is_neutral(c: char) -> bool {
    c.is_whitespace() || c == '\u{200C}' || c == '\u{200D}'
}

/// Splits `text` into runs by the font that can draw them.
///
/// Whitespace and joiners stay with the run they follow. Scripts without a
/// font in `fonts` fall through to the standard faces.
pub fn segment<'t>(text: &'t str, fonts: &FontSet) -> Vec<TextSegment<'t>> {
    let mut segments = Vec::new();
    let mut current: Option<Option<Script>> = None;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if is_neutral(c) && current.is_some() {
            continue;
        }
        let script = Script::of(c).filter(|s| fonts.contains(*s));
        match current {
            Some(active) if active == script => {}
            Some(active) => {
                segments.push(TextSegment {
                    script: active,
                    text: &text[start..index],
                });
                start = index;
                current = Some(script);
            }
            None => current = Some(script),
        }
    }
    if let Some(active) = current {
        segments.push(TextSegment {
            script: active,
            text: &text[start..],
        });
    }
    segments
}

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Width of WinAnsi-encoded text in Helvetica, in thousandths of an em.
///
/// Bytes outside printable ASCII use the average glyph width.
pub fn standard_text_width(encoded: &[u8], bold: bool) -> f32 {
    let table = if bold { &HELVETICA_BOLD_WIDTHS } else { &HELVETICA_WIDTHS };
    encoded
        .iter()
        .map(|&b| match b {
            0x20..=0x7E => f32::from(table[usize::from(b - 0x20)]),
            _ => 556.0,
        })
        .sum()
}
