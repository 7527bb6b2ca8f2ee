// src/renderer.rs
use crate::config::RendererConfig;
use crate::fonts::load_script_fonts;
use crate::sink::{OutputSink, RenderedDocument, write_atomically};
use crate::watermark::bundled_watermark;
use chrono::{DateTime, Utc};
use invoice_layout::{LayoutEngine, PageLayout};
use invoice_render_core::{GraphicsContext, RasterLayers, RenderError, paint_layout};
use invoice_render_lopdf::{CanvasOptions, DocumentInfo, FontSet, ScriptFont, serialize_layout};
use invoice_traits::{BuiltinLocalizer, Localizer};
use invoice_types::{InvoiceDocument, RasterAsset};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Source of the `/CreationDate` written into the document info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timestamp {
    /// The wall clock at render time.
    #[default]
    Now,
    /// A fixed instant, for reproducible output.
    Fixed(DateTime<Utc>),
    /// No creation date at all.
    Omit,
}

impl Timestamp {
    fn creation_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Now => Some(now),
            Timestamp::Fixed(at) => Some(*at),
            Timestamp::Omit => None,
        }
    }

    fn naming_instant(&self) -> DateTime<Utc> {
        match self {
            Timestamp::Fixed(at) => *at,
            _ => Utc::now(),
        }
    }
}

/// A builder for configuring an [`InvoiceRenderer`].
#[derive(Default)]
pub struct InvoiceRendererBuilder {
    localizer: Option<Arc<dyn Localizer>>,
    watermark: Option<Arc<RasterAsset>>,
    fonts: FontSet,
    config: RendererConfig,
    timestamp: Timestamp,
}

impl InvoiceRendererBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the built-in en/kn/mr label tables.
    pub fn with_localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Some(Arc::new(localizer));
        self
    }

    /// Uses `watermark` instead of the bundled logo or `config.watermark_path`.
    pub fn with_watermark(mut self, watermark: RasterAsset) -> Self {
        self.watermark = Some(Arc::new(watermark));
        self
    }

    /// Embeds `font` for its script, ahead of configured or system fonts.
    pub fn with_script_font(mut self, font: ScriptFont) -> Self {
        self.fonts.insert(font);
        self
    }

    pub fn with_config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Resolves the watermark and script fonts and builds the renderer.
    ///
    /// Fails if the configured watermark or a configured font file cannot be
    /// read or decoded.
    pub fn build(self) -> Result<InvoiceRenderer, RenderError> {
        let watermark = match (self.watermark, &self.config.watermark_path) {
            (Some(watermark), _) => watermark,
            (None, Some(path)) => {
                log::info!("Loading watermark from {}", path.display());
                let bytes = std::fs::read(path)?;
                Arc::new(RasterAsset::decode(&bytes)?)
            }
            (None, None) => bundled_watermark()?,
        };
        let localizer = self
            .localizer
            .unwrap_or_else(|| Arc::new(BuiltinLocalizer) as Arc<dyn Localizer>);
        let fonts = load_script_fonts(&self.config, self.fonts)?;

        Ok(InvoiceRenderer {
            localizer,
            watermark,
            fonts,
            options: self.config.canvas_options(),
            timestamp: self.timestamp,
            output_dir: self.config.output_dir,
            file_prefix: self.config.file_prefix,
        })
    }
}

/// Renders invoices to single-page PDF documents.
///
/// A renderer holds only immutable, shared state (the localizer, the decoded
/// watermark and the script fonts), so one instance can serve concurrent calls as long as
/// each call writes to its own sink.
#[derive(Clone)]
pub struct InvoiceRenderer {
    localizer: Arc<dyn Localizer>,
    watermark: Arc<RasterAsset>,
    fonts: FontSet,
    options: CanvasOptions,
    timestamp: Timestamp,
    output_dir: PathBuf,
    file_prefix: String,
}

impl std::fmt::Debug for InvoiceRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceRenderer")
            .field("localizer", &self.localizer)
            .field("watermark", &(self.watermark.width(), self.watermark.height()))
            .field("fonts", &self.fonts)
            .field("options", &self.options)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

impl InvoiceRenderer {
    /// A renderer with the built-in labels, the bundled logo and default options.
    pub fn new() -> Result<Self, RenderError> {
        Self::builder().build()
    }

    pub fn builder() -> InvoiceRendererBuilder {
        InvoiceRendererBuilder::new()
    }

    /// The timestamp-named sink in the configured output directory.
    pub fn default_sink(&self) -> OutputSink {
        OutputSink::directory(&self.output_dir, &self.file_prefix)
    }

    pub fn layout(&self, document: &InvoiceDocument) -> PageLayout {
        LayoutEngine::new(self.localizer.as_ref()).layout(document)
    }

    /// Replays the page onto an arbitrary graphics backend.
    pub fn paint<G>(
        &self,
        document: &InvoiceDocument,
        signature: Option<&RasterAsset>,
        ctx: &mut G,
    ) -> Result<(), RenderError>
    where
        G: GraphicsContext + ?Sized,
    {
        let layout = self.layout(document);
        let layers = RasterLayers::prepare(&self.watermark, signature)?;
        paint_layout(&layout, &layers, ctx)
    }

    pub fn render_to_bytes(
        &self,
        document: &InvoiceDocument,
        signature: Option<&RasterAsset>,
    ) -> Result<Vec<u8>, RenderError> {
        self.build_document(document, signature, Utc::now())
    }

    /// Writes the document to `writer`.
    ///
    /// The document is fully built before the first byte is written.
    pub fn render_to_writer<W: Write>(
        &self,
        document: &InvoiceDocument,
        signature: Option<&RasterAsset>,
        writer: &mut W,
    ) -> Result<(), RenderError> {
        let bytes = self.render_to_bytes(document, signature)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Renders the document and writes it atomically to `sink`.
    pub fn render(
        &self,
        document: &InvoiceDocument,
        signature: Option<&RasterAsset>,
        sink: &OutputSink,
    ) -> Result<RenderedDocument, RenderError> {
        let at = self.timestamp.naming_instant();
        let bytes = self.build_document(document, signature, at)?;
        let path = sink.resolve(at);
        write_atomically(&path, &bytes)?;
        log::info!("Wrote invoice {} to {}", document.invoice_number, path.display());
        Ok(RenderedDocument {
            bytes,
            location: Some(path),
        })
    }

    fn build_document(
        &self,
        document: &InvoiceDocument,
        signature: Option<&RasterAsset>,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError> {
        log::info!(
            "Rendering invoice {} ({} rows, template {:?})",
            document.invoice_number,
            document.lines.len(),
            document.template_variant
        );
        let layout = self.layout(document);
        let layers = RasterLayers::prepare(&self.watermark, signature)?;
        let mut info = DocumentInfo::new(format!("Invoice {}", document.invoice_number));
        info.creation_date = self.timestamp.creation_date(now);

        let bytes = serialize_layout(&layout, &layers, self.options, &self.fonts, &info)?;
        log::info!("Rendered invoice {} ({} bytes)", document.invoice_number, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_render_core::RecordingContext;
    use invoice_traits::{FnLocalizer, LabelKey};
    use invoice_types::{InvoiceLine, LanguageCode};

    fn sample() -> InvoiceDocument {
        InvoiceDocument::new("VTM-2026-001", "Asha Rao")
            .with_line(InvoiceLine::new("Stage Decoration", 1, 5000))
            .with_line(InvoiceLine::new("Sound System Setup", 1, 3000))
    }

    fn signature() -> RasterAsset {
        RasterAsset::from_rgba(70, 20, vec![0, 0, 0, 255].repeat(70 * 20)).unwrap()
    }

    #[test]
    fn paint_without_signature_draws_label_and_watermark_only() {
        let renderer = InvoiceRenderer::new().unwrap();
        let mut ctx = RecordingContext::new();
        renderer.paint(&sample(), None, &mut ctx).unwrap();

        assert_eq!(ctx.images().count(), 1);
        assert!(ctx.contains_text("Authorized Signature"));
    }

    #[test]
    fn paint_with_signature_scales_it_to_slot() {
        let renderer = InvoiceRenderer::new().unwrap();
        let mut ctx = RecordingContext::new();
        renderer.paint(&sample(), Some(&signature()), &mut ctx).unwrap();

        let images: Vec<_> = ctx.images().collect();
        assert_eq!(images.len(), 2);
        assert_eq!(*images[0].0, (260, 260));
        assert_eq!(*images[1].0, (140, 40));
    }

    #[test]
    fn injected_localizer_reaches_the_page() {
        let renderer = InvoiceRenderer::builder()
            .with_localizer(FnLocalizer(|_: LanguageCode, key: LabelKey| match key {
                LabelKey::BusinessName => "Test Hall".to_string(),
                other => BuiltinLocalizer.text(LanguageCode::En, other).into_owned(),
            }))
            .build()
            .unwrap();
        let mut ctx = RecordingContext::new();
        renderer.paint(&sample(), None, &mut ctx).unwrap();
        assert!(ctx.contains_text("Test Hall"));
    }

    #[test]
    fn timestamp_controls_creation_date() {
        let now = Utc::now();
        assert_eq!(Timestamp::Now.creation_date(now), Some(now));
        assert_eq!(Timestamp::Omit.creation_date(now), None);
        let fixed = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(Timestamp::Fixed(fixed).creation_date(now), Some(fixed));
        assert_eq!(Timestamp::Fixed(fixed).naming_instant(), fixed);
    }

    #[test]
    fn unreadable_watermark_path_fails_build() {
        let config = RendererConfig {
            watermark_path: Some(PathBuf::from("/no/such/logo.png")),
            ..RendererConfig::default()
        };
        let err = InvoiceRenderer::builder().with_config(config).build().unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn script_font_reaches_the_document() {
        let font_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/VtmIndicTest.ttf");
        let font = ScriptFont::from_bytes(
            invoice_render_lopdf::Script::Kannada,
            std::fs::read(font_path).unwrap(),
            0,
        )
        .unwrap();
        let config = RendererConfig {
            system_fonts: false,
            ..RendererConfig::default()
        };
        let renderer = InvoiceRenderer::builder()
            .with_config(config)
            .with_script_font(font)
            .build()
            .unwrap();
        let document = sample().with_language(LanguageCode::Kn);
        let bytes = renderer.render_to_bytes(&document, None).unwrap();
        assert!(bytes.windows(b"/Identity-H".len()).any(|w| w == b"/Identity-H"));
    }

    #[test]
    fn missing_font_path_fails_build() {
        let config = RendererConfig {
            fonts: crate::config::ScriptFontPaths {
                kannada: Some(PathBuf::from("/no/such/font.ttf")),
                devanagari: None,
            },
            system_fonts: false,
            ..RendererConfig::default()
        };
        let err = InvoiceRenderer::builder().with_config(config).build().unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InvoiceRenderer>();
    }
}
