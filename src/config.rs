use invoice_render_lopdf::{CanvasOptions, GlyphPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "VTM_INVOICE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Font files for the scripts the standard faces cannot show.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptFontPaths {
    pub kannada: Option<PathBuf>,
    pub devanagari: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
    /// Directory for timestamp-named output files.
    pub output_dir: PathBuf,
    /// Prefix of timestamp-named output files (`<prefix>_<millis>.pdf`).
    pub file_prefix: String,
    /// Replaces the bundled watermark logo.
    pub watermark_path: Option<PathBuf>,
    pub glyph_policy: GlyphPolicy,
    pub compress_streams: bool,
    /// Prefix used when issuing invoice numbers.
    pub invoice_prefix: String,
    /// Explicit Kannada and Devanagari font files.
    pub fonts: ScriptFontPaths,
    /// Extra directories searched for script fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Whether installed system fonts are searched for script fonts.
    pub system_fonts: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            output_dir: std::env::temp_dir(),
            file_prefix: "VTM".to_string(),
            watermark_path: None,
            glyph_policy: GlyphPolicy::default(),
            compress_streams: true,
            invoice_prefix: "VTM".to_string(),
            fonts: ScriptFontPaths::default(),
            font_dirs: Vec::new(),
            system_fonts: true,
        }
    }
}

impl RendererConfig {
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.resolve_relative_to(path.parent().unwrap_or_else(|| Path::new("")));
        Ok(config)
    }

    /// Loads the file named by `VTM_INVOICE_CONFIG`, or the defaults when it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => {
                log::info!("Loading renderer config from {}", path);
                Self::from_json_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn canvas_options(&self) -> CanvasOptions {
        CanvasOptions {
            glyph_policy: self.glyph_policy,
            compress_streams: self.compress_streams,
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        let files = [
            self.watermark_path.as_mut(),
            self.fonts.kannada.as_mut(),
            self.fonts.devanagari.as_mut(),
        ];
        for path in files.into_iter().flatten().chain(self.font_dirs.iter_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
