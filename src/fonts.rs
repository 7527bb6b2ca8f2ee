//! Locating Kannada and Devanagari fonts.
//!
//! Explicit paths from [`RendererConfig::fonts`] win. Otherwise the configured
//! font directories and, when enabled, the installed system fonts are searched
//! for well-known families.

use crate::config::RendererConfig;
use invoice_render_core::RenderError;
use invoice_render_lopdf::{FontSet, Script, ScriptFont};
use once_cell::sync::Lazy;
use std::path::Path;

static SYSTEM_FONTS: Lazy<fontdb::Database> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Indexed {} system font faces", db.len());
    db
});

fn candidate_families(script: Script) -> &'static [&'static str] {
    match script {
        Script::Kannada => &[
            "Noto Sans Kannada",
            "Noto Sans Kannada UI",
            "Noto Serif Kannada",
            "Lohit Kannada",
            "Gubbi",
            "Tunga",
            "Nirmala UI",
        ],
        Script::Devanagari => &[
            "Noto Sans Devanagari",
            "Noto Sans Devanagari UI",
            "Noto Serif Devanagari",
            "Lohit Devanagari",
            "Lohit Marathi",
            "Mangal",
            "Nirmala UI",
        ],
    }
}

/// Reads a font file and checks it covers `script`.
pub fn load_font_file(script: Script, path: &Path) -> Result<ScriptFont, RenderError> {
    let data = std::fs::read(path)?;
    let font = ScriptFont::from_bytes(script, data, 0)?;
    log::info!(
        "Using {} for {} text ({})",
        font.postscript_name(),
        script.as_str(),
        path.display()
    );
    Ok(font)
}

fn discover(db: &fontdb::Database, script: Script) -> Option<ScriptFont> {
    candidate_families(script).iter().find_map(|family| {
        let id = db.query(&fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })?;
        let loaded = db.with_face_data(id, |data, index| {
            ScriptFont::from_bytes(script, data.to_vec(), index)
        })?;
        match loaded {
            Ok(font) => {
                log::info!("Using {} ({}) for {} text", family, font.postscript_name(), script.as_str());
                Some(font)
            }
            Err(e) => {
                log::warn!("Skipping font family {}: {}", family, e);
                None
            }
        }
    })
}

/// Fills the scripts `fonts` does not cover yet.
///
/// A configured path that cannot be read or parsed is an error. A script
/// with no font found anywhere is only logged; its text then follows the
/// glyph policy of the standard faces.
pub fn load_script_fonts(config: &RendererConfig, mut fonts: FontSet) -> Result<FontSet, RenderError> {
    let configured = [
        (Script::Kannada, config.fonts.kannada.as_deref()),
        (Script::Devanagari, config.fonts.devanagari.as_deref()),
    ];
    for (script, path) in configured {
        if let Some(path) = path {
            if !fonts.contains(script) {
                fonts.insert(load_font_file(script, path)?);
            }
        }
    }

    let missing: Vec<Script> = Script::ALL
        .into_iter()
        .filter(|script| !fonts.contains(*script))
        .collect();
    if missing.is_empty() || (config.font_dirs.is_empty() && !config.system_fonts) {
        return Ok(fonts);
    }

    let mut db = if config.system_fonts {
        SYSTEM_FONTS.clone()
    } else {
        fontdb::Database::new()
    };
    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }
    for script in missing {
        match discover(&db, script) {
            Some(font) => fonts.insert(font),
            None => log::warn!(
                "No {} font found; {} text falls back to the standard faces",
                script.as_str(),
                script.as_str()
            ),
        }
    }
    Ok(fonts)
}
