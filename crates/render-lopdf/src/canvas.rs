// crates/render-lopdf/src/canvas.rs
use crate::encoding::{GlyphPolicy, encode_win_ansi};
use crate::fonts::{FontSet, Script, ScriptFont, ShapedRun, segment, standard_text_width};
use crate::image;
use crate::metadata::{DocumentInfo, pdf_date};
use invoice_layout::{FontWeight, Stroke, TextStyle};
use invoice_render_core::utils::flip_y;
use invoice_render_core::{GraphicsContext, RenderError};
use invoice_types::{Color, Point, RasterAsset, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasOptions {
    pub glyph_policy: GlyphPolicy,
    pub compress_streams: bool,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            glyph_policy: GlyphPolicy::default(),
            compress_streams: true,
        }
    }
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: &'static str,
    font_size: f32,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

/// Glyphs drawn from one embedded font, keyed by glyph id.
struct EmbeddedFont {
    font: Arc<ScriptFont>,
    glyphs: BTreeMap<u16, GlyphUse>,
}

struct GlyphUse {
    width: i64,
    text: String,
}

/// A text run ready to be written with one font.
enum TextPiece<'t> {
    Standard(Vec<u8>),
    Shaped {
        script: Script,
        run: ShapedRun,
        text: &'t str,
    },
}

/// A [`GraphicsContext`] that assembles a single-page PDF with `lopdf`.
///
/// Drawing calls append operators to the page content stream; images are
/// added to the document as XObjects as they are drawn. [`finish`](Self::finish)
/// builds the page tree and serializes the document.
pub struct LopdfCanvas {
    document: Document,
    page_size: Size,
    options: CanvasOptions,
    content: Content,
    state: PageRenderState,
    xobjects: BTreeMap<String, ObjectId>,
    ext_gstates: BTreeMap<String, f32>,
    fonts: FontSet,
    embedded: BTreeMap<Script, EmbeddedFont>,
}

impl LopdfCanvas {
    pub fn new(page_size: Size, options: CanvasOptions) -> Self {
        Self {
            document: Document::with_version("1.7"),
            page_size,
            options,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            xobjects: BTreeMap::new(),
            ext_gstates: BTreeMap::new(),
            fonts: FontSet::default(),
            embedded: BTreeMap::new(),
        }
    }

    /// Script fonts used for Kannada and Devanagari runs. Without one, those
    /// runs go through the standard faces and the glyph policy.
    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn color_operands(color: Color) -> Vec<Object> {
        color.to_unit_rgb().into_iter().map(Object::from).collect()
    }

    fn set_font(&mut self, font_name: &'static str, font_size: f32) {
        if self.state.font_name != font_name || self.state.font_size != font_size {
            self.push("Tf", vec![font_name.into(), font_size.into()]);
            self.state.font_name = font_name;
            self.state.font_size = font_size;
        }
    }

    /// Encodes or shapes every piece of `text` before anything is written, so
    /// a failing run leaves the content stream untouched.
    fn prepare_text<'t>(&self, text: &'t str) -> Result<Vec<TextPiece<'t>>, RenderError> {
        segment(text, &self.fonts)
            .into_iter()
            .map(|piece| match piece.script.and_then(|s| self.fonts.get(s).map(|f| (s, f))) {
                Some((script, font)) => {
                    let run = font.shape(piece.text)?;
                    run.check_coverage(font, self.options.glyph_policy)?;
                    Ok(TextPiece::Shaped {
                        script,
                        run,
                        text: piece.text,
                    })
                }
                None => Ok(TextPiece::Standard(encode_win_ansi(piece.text, self.options.glyph_policy)?)),
            })
            .collect()
    }

    /// Writes one shaped run as a `TJ` sequence of two-byte glyph ids and
    /// returns its advance in user space.
    fn show_shaped(&mut self, script: Script, run: &ShapedRun, text: &str, size: f32) -> f32 {
        let Some(font) = self.fonts.get(script).cloned() else {
            return 0.0;
        };
        let used = self.embedded.entry(script).or_insert_with(|| EmbeddedFont {
            font,
            glyphs: BTreeMap::new(),
        });
        for glyph in &run.glyphs {
            let entry = used.glyphs.entry(glyph.id).or_insert_with(|| GlyphUse {
                width: glyph.width as i64,
                text: String::new(),
            });
            if entry.text.is_empty() {
                entry.text.clone_from(&glyph.unicode);
            }
        }

        self.push(
            "BDC",
            vec![
                Object::Name(b"Span".to_vec()),
                Object::Dictionary(dictionary! {
                    "ActualText" => Object::String(utf16_be(text), StringFormat::Hexadecimal),
                }),
            ],
        );
        let mut rise = 0.0;
        let mut array: Vec<Object> = Vec::new();
        let mut ids: Vec<u8> = Vec::new();
        for glyph in &run.glyphs {
            if glyph.y_offset != rise {
                flush_glyphs(&mut array, &mut ids);
                if !array.is_empty() {
                    self.push("TJ", vec![Object::Array(std::mem::take(&mut array))]);
                }
                rise = glyph.y_offset;
                self.push("Ts", vec![(rise * size / 1000.0).into()]);
            }
            if glyph.x_offset != 0.0 {
                flush_glyphs(&mut array, &mut ids);
                array.push((-glyph.x_offset).into());
            }
            ids.extend_from_slice(&glyph.id.to_be_bytes());
            let adjust = glyph.width - (glyph.x_advance - glyph.x_offset);
            if adjust.abs() > 0.01 {
                flush_glyphs(&mut array, &mut ids);
                array.push(adjust.into());
            }
        }
        flush_glyphs(&mut array, &mut ids);
        if !array.is_empty() {
            self.push("TJ", vec![Object::Array(array)]);
        }
        if rise != 0.0 {
            self.push("Ts", vec![Object::Integer(0)]);
        }
        self.push("EMC", vec![]);
        run.advance() * size / 1000.0
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", Self::color_operands(color));
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        if self.state.line_width != Some(stroke.width) {
            self.push("w", vec![stroke.width.into()]);
            self.state.line_width = Some(stroke.width);
        }
        if self.state.stroke_color != Some(stroke.color) {
            self.push("RG", Self::color_operands(stroke.color));
            self.state.stroke_color = Some(stroke.color);
        }
    }

    /// Registers a constant-alpha graphics state and returns its resource name.
    fn ext_gstate_for(&mut self, opacity: f32) -> String {
        // Quantized so equal opacities share one resource.
        let name = format!("GS{}", (opacity * 1000.0).round() as u32);
        self.ext_gstates.entry(name.clone()).or_insert(opacity);
        name
    }

    fn add_image(&mut self, raster: &RasterAsset) -> Result<String, RenderError> {
        let compress = self.options.compress_streams;
        let smask_id = image::soft_mask(raster, compress)?.map(|mask| self.document.add_object(mask));
        let image_id = self
            .document
            .add_object(image::color_image(raster, smask_id, compress)?);
        let name = format!("Im{}", self.xobjects.len() + 1);
        self.xobjects.insert(name.clone(), image_id);
        Ok(name)
    }

    /// Writes the Type0 font, its CID descendant, descriptor, program and
    /// `/ToUnicode` map for every script font the page used.
    fn embed_fonts(&mut self) -> Result<Vec<(&'static str, ObjectId)>, RenderError> {
        let compress = self.options.compress_streams;
        let mut ids = Vec::new();
        for (script, used) in std::mem::take(&mut self.embedded) {
            let font = &used.font;
            let metrics = font.metrics()?;
            let name = font.postscript_name().to_string();

            let program = font.data();
            let mut program_dict = dictionary! {"Length1" => program.len() as i64};
            let program_stream = if compress {
                program_dict.set("Filter", "FlateDecode");
                Stream::new(program_dict, image::compress(program)?)
            } else {
                Stream::new(program_dict, program.to_vec())
            };
            let program_id = self.document.add_object(program_stream.with_compression(false));

            let descriptor_id = self.document.add_object(dictionary! {
                "Type" => "FontDescriptor",
                "FontName" => Object::Name(name.clone().into_bytes()),
                "Flags" => 4i64,
                "FontBBox" => metrics.bbox.iter().map(|v| Object::Integer(v.round() as i64)).collect::<Vec<_>>(),
                "ItalicAngle" => Object::Integer(0),
                "Ascent" => Object::Integer(metrics.ascent.round() as i64),
                "Descent" => Object::Integer(metrics.descent.round() as i64),
                "CapHeight" => Object::Integer(metrics.cap_height.round() as i64),
                "StemV" => Object::Integer(80),
                "FontFile2" => program_id,
            });

            let mut widths = Vec::with_capacity(used.glyphs.len() * 2);
            for (gid, glyph) in &used.glyphs {
                widths.push(Object::Integer(i64::from(*gid)));
                widths.push(Object::Array(vec![Object::Integer(glyph.width)]));
            }
            let cid_font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "CIDFontType2",
                "BaseFont" => Object::Name(name.clone().into_bytes()),
                "CIDSystemInfo" => dictionary! {
                    "Registry" => Object::string_literal("Adobe"),
                    "Ordering" => Object::string_literal("Identity"),
                    "Supplement" => Object::Integer(0),
                },
                "FontDescriptor" => descriptor_id,
                "DW" => Object::Integer(1000),
                "W" => widths,
                "CIDToGIDMap" => "Identity",
            });

            let cmap = to_unicode_cmap(&used.glyphs).into_bytes();
            let cmap_stream = if compress {
                Stream::new(dictionary! {"Filter" => "FlateDecode"}, image::compress(&cmap)?)
            } else {
                Stream::new(dictionary! {}, cmap)
            };
            let cmap_id = self.document.add_object(cmap_stream.with_compression(false));

            let type0_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => Object::Name(name.into_bytes()),
                "Encoding" => "Identity-H",
                "DescendantFonts" => vec![Object::Reference(cid_font_id)],
                "ToUnicode" => cmap_id,
            });
            log::debug!(
                "Embedded {} font {} with {} glyph(s)",
                script.as_str(),
                font.postscript_name(),
                used.glyphs.len()
            );
            ids.push((script.resource_name(), type0_id));
        }
        Ok(ids)
    }

    fn resources(&self, script_fonts: &[(&'static str, ObjectId)]) -> Dictionary {
        let font = |base: &str| {
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base,
                "Encoding" => "WinAnsiEncoding",
            }
        };
        let mut fonts = dictionary! {
            REGULAR_FONT => font("Helvetica"),
            BOLD_FONT => font("Helvetica-Bold"),
        };
        for (name, id) in script_fonts {
            fonts.set(*name, Object::Reference(*id));
        }
        let mut resources = dictionary! {"Font" => fonts};
        if !self.xobjects.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in &self.xobjects {
                xobjects.set(name.as_bytes(), Object::Reference(*id));
            }
            resources.set("XObject", xobjects);
        }
        if !self.ext_gstates.is_empty() {
            let mut states = Dictionary::new();
            for (name, opacity) in &self.ext_gstates {
                states.set(
                    name.as_bytes(),
                    dictionary! {
                        "Type" => "ExtGState",
                        "ca" => *opacity,
                        "CA" => *opacity,
                    },
                );
            }
            resources.set("ExtGState", states);
        }
        resources
    }

    fn content_stream(&self) -> Result<Stream, RenderError> {
        let encoded = self.content.encode()?;
        if self.options.compress_streams {
            let compressed = image::compress(&encoded)?;
            Ok(Stream::new(dictionary! {"Filter" => "FlateDecode"}, compressed).with_compression(false))
        } else {
            Ok(Stream::new(dictionary! {}, encoded).with_compression(false))
        }
    }

    /// Builds the page tree, catalog and info dictionary and writes the
    /// serialized document to `writer`.
    pub fn finish_into<W: Write>(mut self, info: &DocumentInfo, writer: &mut W) -> Result<(), RenderError> {
        let content_id = self.document.add_object(self.content_stream()?);
        let script_fonts = self.embed_fonts()?;
        let resources = self.resources(&script_fonts);

        let pages_id = self.document.new_object_id();
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                self.page_size.width.into(),
                self.page_size.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1i64,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut info_dict = dictionary! {
            "Producer" => Object::string_literal(info.producer.as_str()),
        };
        if let Some(title) = &info.title {
            info_dict.set(
                "Title",
                Object::String(encode_win_ansi(title, GlyphPolicy::Replace)?, StringFormat::Literal),
            );
        }
        if let Some(date) = &info.creation_date {
            info_dict.set("CreationDate", Object::string_literal(pdf_date(date)));
        }
        let info_id = self.document.add_object(info_dict);
        self.document.trailer.set("Info", info_id);

        self.document.save_to(writer)?;
        Ok(())
    }

    pub fn finish(self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.finish_into(info, &mut buffer)?;
        Ok(buffer)
    }
}

impl GraphicsContext for LopdfCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.set_fill_color(color);
        let y = flip_y(rect.bottom(), self.page_size.height);
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("f", vec![]);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> Result<(), RenderError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let pieces = self.prepare_text(text)?;
        let bold = style.font_weight == FontWeight::Bold;
        let baseline = flip_y(origin.y, self.page_size.height);
        let mut x = origin.x;
        for piece in pieces {
            self.push("BT", vec![]);
            let advance = match piece {
                TextPiece::Standard(encoded) => {
                    self.set_font(if bold { BOLD_FONT } else { REGULAR_FONT }, style.font_size);
                    self.set_fill_color(style.color);
                    self.push("Td", vec![x.into(), baseline.into()]);
                    let advance = standard_text_width(&encoded, bold) * style.font_size / 1000.0;
                    self.push("Tj", vec![Object::String(encoded, StringFormat::Literal)]);
                    advance
                }
                TextPiece::Shaped { script, run, text } => {
                    self.set_font(script.resource_name(), style.font_size);
                    self.set_fill_color(style.color);
                    self.push("Td", vec![x.into(), baseline.into()]);
                    self.show_shaped(script, &run, text, style.font_size)
                }
            };
            self.push("ET", vec![]);
            x += advance;
        }
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        self.set_stroke(stroke);
        let height = self.page_size.height;
        self.push("m", vec![from.x.into(), flip_y(from.y, height).into()]);
        self.push("l", vec![to.x.into(), flip_y(to.y, height).into()]);
        self.push("S", vec![]);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError> {
        self.set_stroke(stroke);
        let y = flip_y(rect.bottom(), self.page_size.height);
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("S", vec![]);
        Ok(())
    }

    fn draw_image(&mut self, raster: &RasterAsset, dest: Rect, opacity: f32) -> Result<(), RenderError> {
        let name = self.add_image(raster)?;
        let y = flip_y(dest.bottom(), self.page_size.height);
        self.push("q", vec![]);
        if opacity < 1.0 {
            let gs = self.ext_gstate_for(opacity.clamp(0.0, 1.0));
            self.push("gs", vec![Object::Name(gs.into_bytes())]);
        }
        self.push(
            "cm",
            vec![
                dest.width.into(),
                Object::Integer(0),
                Object::Integer(0),
                dest.height.into(),
                dest.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }
}

fn flush_glyphs(array: &mut Vec<Object>, ids: &mut Vec<u8>) {
    if !ids.is_empty() {
        array.push(Object::String(std::mem::take(ids), StringFormat::Hexadecimal));
    }
}

fn utf16_be(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

fn hex_utf16(text: &str) -> String {
    text.encode_utf16().map(|unit| format!("{unit:04X}")).collect()
}

/// Builds a `/ToUnicode` CMap for two-byte glyph ids.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, GlyphUse>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    let mapped: Vec<(&u16, &GlyphUse)> = glyphs.iter().filter(|(_, g)| !g.text.is_empty()).collect();
    // At most 100 entries per bfchar block.
    for block in mapped.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, glyph) in block {
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, hex_utf16(&glyph.text)));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap\nCMapName currentdict /CMapResource defineresource pop\nend\nend\n");
    cmap
}
