use lopdf::content::Operation;
use lopdf::{Dictionary, Document as LopdfDocument};
use std::collections::HashMap;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

fn page_resources(doc: &LopdfDocument) -> &Dictionary {
    let pages = doc.get_pages();
    let page_id = *pages.values().next().expect("document has a page");
    let page = doc.get_dictionary(page_id).expect("page dictionary");
    page.get(b"Resources")
        .and_then(|r| r.as_dict())
        .expect("page carries direct resources")
}

/// Number of XObjects referenced by the page.
pub fn xobject_count(doc: &LopdfDocument) -> usize {
    page_resources(doc)
        .get(b"XObject")
        .and_then(|x| x.as_dict())
        .map(|x| x.len())
        .unwrap_or(0)
}

fn page_font<'a>(doc: &'a LopdfDocument, resource: &[u8]) -> Option<&'a Dictionary> {
    let fonts = page_resources(doc).get(b"Font").and_then(|f| f.as_dict()).ok()?;
    let (_, font) = doc.dereference(fonts.get(resource).ok()?).ok()?;
    font.as_dict().ok()
}

/// BaseFont names referenced by the page.
pub fn font_names(doc: &LopdfDocument) -> Vec<String> {
    let fonts = match page_resources(doc).get(b"Font").and_then(|f| f.as_dict()) {
        Ok(fonts) => fonts,
        Err(_) => return Vec::new(),
    };
    fonts
        .iter()
        .filter_map(|(name, _)| page_font(doc, name))
        .filter_map(|font| font.get(b"BaseFont").and_then(|b| b.as_name()).ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// Subtype of the font registered under `resource`, e.g. `Type0`.
pub fn font_subtype(doc: &LopdfDocument, resource: &[u8]) -> Option<String> {
    let font = page_font(doc, resource)?;
    let subtype = font.get(b"Subtype").and_then(|s| s.as_name()).ok()?;
    Some(String::from_utf8_lossy(subtype).to_string())
}

/// The descendant CIDFont of a Type0 font.
pub fn descendant_font<'a>(doc: &'a LopdfDocument, resource: &[u8]) -> Option<&'a Dictionary> {
    let font = page_font(doc, resource)?;
    let descendants = font.get(b"DescendantFonts").and_then(|d| d.as_array()).ok()?;
    let (_, descendant) = doc.dereference(descendants.first()?).ok()?;
    descendant.as_dict().ok()
}

/// Glyph code to text, parsed from the `bfchar` blocks of a font's `/ToUnicode` CMap.
pub fn to_unicode_map(doc: &LopdfDocument, resource: &[u8]) -> HashMap<u16, String> {
    let mut map = HashMap::new();
    let Some(font) = page_font(doc, resource) else {
        return map;
    };
    let Ok(cmap_id) = font.get(b"ToUnicode").and_then(|c| c.as_reference()) else {
        return map;
    };
    let Ok(stream) = doc.get_object(cmap_id).and_then(|o| o.as_stream()) else {
        return map;
    };
    let content = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let text = String::from_utf8_lossy(&content);

    let mut in_block = false;
    for line in text.lines().map(str::trim) {
        if line.ends_with("beginbfchar") {
            in_block = true;
        } else if line == "endbfchar" {
            in_block = false;
        } else if in_block {
            let parts: Vec<&str> = line
                .split(|c| c == '<' || c == '>' || c == ' ')
                .filter(|p| !p.is_empty())
                .collect();
            if let [code, unicode] = parts[..] {
                let units: Vec<u16> = (0..unicode.len())
                    .step_by(4)
                    .filter_map(|i| unicode.get(i..i + 4))
                    .filter_map(|h| u16::from_str_radix(h, 16).ok())
                    .collect();
                if let Ok(code) = u16::from_str_radix(code, 16) {
                    map.insert(code, String::from_utf16_lossy(&units));
                }
            }
        }
    }
    map
}

pub fn numbers(op: &Operation) -> Vec<f32> {
    op.operands.iter().filter_map(|o| o.as_float().ok()).collect()
}

/// `re` operations followed by a stroke (`S`), as [x, y, w, h].
pub fn stroked_rects(ops: &[Operation]) -> Vec<Vec<f32>> {
    ops.windows(2)
        .filter(|pair| pair[0].operator == "re" && pair[1].operator == "S")
        .map(|pair| numbers(&pair[0]))
        .collect()
}

/// The last line width set before each stroked rectangle.
pub fn stroke_width_before(ops: &[Operation], index: usize) -> Option<f32> {
    ops[..index]
        .iter()
        .rev()
        .find(|op| op.operator == "w")
        .and_then(|op| numbers(op).first().copied())
}
