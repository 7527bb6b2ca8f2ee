pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use lopdf::content::{Content, Operation};
use std::collections::HashMap;
use vtm_invoice::{InvoiceDocument, InvoiceRenderer, RasterAsset, RenderError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Parse raw bytes with lopdf, the independent reader used by these tests
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Decoded operators of the single page's content stream
    pub fn operations(&self) -> Vec<Operation> {
        let pages = self.doc.get_pages();
        let page_id = *pages.values().next().expect("document has a page");
        let content = self.doc.get_and_decode_page_content(page_id).expect("content decodes");
        let Content { operations } = content;
        operations
    }

    /// Raw (decompressed) content stream of the single page
    pub fn content_bytes(&self) -> Vec<u8> {
        let pages = self.doc.get_pages();
        let page_id = *pages.values().next().expect("document has a page");
        self.doc.get_page_content(page_id).expect("content readable")
    }

    /// Every string painted with `Tj`, decoded as Latin-1.
    pub fn shown_strings(&self) -> Vec<String> {
        self.operations()
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|operand| operand.as_str().ok())
            .map(|bytes| bytes.iter().map(|&b| b as char).collect())
            .collect()
    }

    /// Text of each `BT`..`ET` block with the font resource it was set in.
    ///
    /// `Tj` strings are read as Latin-1. `TJ` glyph ids of embedded fonts are
    /// mapped back through the font's `/ToUnicode` CMap.
    pub fn text_blocks(&self) -> Vec<(String, String)> {
        let mut maps = HashMap::new();
        let mut blocks = Vec::new();
        let mut font = String::new();
        let mut current: Option<String> = None;
        for op in self.operations() {
            match op.operator.as_str() {
                "BT" => current = Some(String::new()),
                "ET" => {
                    if let Some(text) = current.take() {
                        blocks.push((font.clone(), text));
                    }
                }
                "Tf" => {
                    if let Some(name) = op.operands.first().and_then(|o| o.as_name().ok()) {
                        font = String::from_utf8_lossy(name).to_string();
                    }
                }
                "Tj" => {
                    if let (Some(text), Some(bytes)) =
                        (current.as_mut(), op.operands.first().and_then(|o| o.as_str().ok()))
                    {
                        text.extend(bytes.iter().map(|&b| b as char));
                    }
                }
                "TJ" => {
                    let map = maps
                        .entry(font.clone())
                        .or_insert_with(|| pdf_assertions::to_unicode_map(&self.doc, font.as_bytes()));
                    let Some(text) = current.as_mut() else { continue };
                    let Some(items) = op.operands.first().and_then(|o| o.as_array().ok()) else {
                        continue;
                    };
                    for bytes in items.iter().filter_map(|item| item.as_str().ok()) {
                        for pair in bytes.chunks(2) {
                            if let [hi, lo] = pair {
                                if let Some(unicode) = map.get(&u16::from_be_bytes([*hi, *lo])) {
                                    text.push_str(unicode);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        blocks
    }

    /// `/ActualText` of every marked-content span, in paint order.
    pub fn actual_texts(&self) -> Vec<String> {
        self.operations()
            .iter()
            .filter(|op| op.operator == "BDC")
            .filter_map(|op| op.operands.get(1))
            .filter_map(|props| props.as_dict().ok())
            .filter_map(|props| props.get(b"ActualText").and_then(|t| t.as_str()).ok())
            .map(|bytes| {
                let units: Vec<u16> = bytes
                    .chunks(2)
                    .skip(1)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            })
            .collect()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render in memory with `renderer` and parse the result.
pub fn generate_pdf(
    renderer: &InvoiceRenderer,
    invoice: &InvoiceDocument,
    signature: Option<&RasterAsset>,
) -> Result<GeneratedPdf, RenderError> {
    let bytes = renderer.render_to_bytes(invoice, signature)?;
    GeneratedPdf::from_bytes(bytes).map_err(|e| RenderError::Encoding(e.to_string()))
}
