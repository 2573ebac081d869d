//! Content-stream walking.
//!
//! Interprets the text-showing and positioning operators of a page's content
//! stream and yields positioned text runs, one per string-showing operator,
//! which are then merged into same-style fragments per line.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// TJ adjustments beyond this many thousandths of an em read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A positioned piece of text in PDF user space (y grows upward).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub font_name: String,
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        Some(Matrix {
            a: get_number(&operands[0])?,
            b: get_number(&operands[1])?,
            c: get_number(&operands[2])?,
            d: get_number(&operands[3])?,
            e: get_number(&operands[4])?,
            f: get_number(&operands[5])?,
        })
    }

    /// `self × other`: apply `self`, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed text-space y axis.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text state tracked between BT and ET.
#[derive(Debug, Clone)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
        }
    }
}

impl TextState {
    fn begin(&mut self) {
        self.matrix = Matrix::IDENTITY;
        self.line_matrix = Matrix::IDENTITY;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.line_matrix = matrix;
    }
}

/// Walks one page's content stream.
pub(crate) struct ContentWalker<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
}

impl<'a> ContentWalker<'a> {
    pub fn new(doc: &'a LopdfDocument, fonts: BTreeMap<Vec<u8>, &'a lopdf::Dictionary>) -> Self {
        Self { doc, fonts }
    }

    /// Decode `content` and collect its text runs in stream order.
    pub fn runs(&self, content: &[u8]) -> Result<Vec<TextRun>> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::TextExtract(format!("undecodable content stream: {}", e)))?;

        let mut runs = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut saved: Vec<Matrix> = Vec::new();
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in &content.operations {
            let operands = op.operands.as_slice();
            match op.operator.as_str() {
                "q" => saved.push(ctm),
                "Q" => {
                    if let Some(restored) = saved.pop() {
                        ctm = restored;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    state.begin();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Object::Name(key) = &operands[0] {
                            state.font_name = self.base_font(key);
                            state.font_key = key.clone();
                        }
                        state.font_size = get_number(&operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if operands.len() >= 2 {
                        let tx = get_number(&operands[0]).unwrap_or(0.0);
                        let ty = get_number(&operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        state.set_matrix(m);
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        state.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }

                    let text = match op.operator.as_str() {
                        "TJ" => match operands.first() {
                            Some(Object::Array(items)) => self.decode_array(&state.font_key, items),
                            _ => String::new(),
                        },
                        "\"" => self.decode_operand(&state.font_key, operands.get(2)),
                        _ => self.decode_operand(&state.font_key, operands.first()),
                    };

                    if !text.trim().is_empty() {
                        let placed = state.matrix.then(&ctm);
                        runs.push(TextRun {
                            text,
                            x: placed.e,
                            y: placed.f,
                            font_size: state.font_size * placed.vertical_scale(),
                            font_name: state.font_name.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    /// Resolve a resource font key to its BaseFont name.
    fn base_font(&self, key: &[u8]) -> String {
        self.fonts
            .get(key)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string())
    }

    fn decode_operand(&self, font_key: &[u8], operand: Option<&Object>) -> String {
        match operand {
            Some(Object::String(bytes, _)) => self.decode(font_key, bytes),
            _ => String::new(),
        }
    }

    /// Decode a TJ array, turning wide negative adjustments into spaces.
    fn decode_array(&self, font_key: &[u8], items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(font_key, bytes)),
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD && needs_space_after(&combined) {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn decode(&self, font_key: &[u8], bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }
}

/// Whether a word gap after `text` should become a space.
fn needs_space_after(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Merge consecutive runs sharing font, size and baseline into one run.
pub(crate) fn merge_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());

    for run in runs {
        if let Some(last) = merged.last_mut() {
            let same_style = last.font_name == run.font_name
                && (last.font_size - run.font_size).abs() < 0.01;
            let baseline_tolerance = (run.font_size * 0.2).max(0.5);
            if same_style && (last.y - run.y).abs() <= baseline_tolerance {
                if joins_with_space(&last.text, &run.text) {
                    last.text.push(' ');
                }
                last.text.push_str(&run.text);
                continue;
            }
        }
        merged.push(run);
    }

    merged
}

fn joins_with_space(left: &str, right: &str) -> bool {
    let (Some(l), Some(r)) = (left.chars().last(), right.chars().next()) else {
        return false;
    };
    !l.is_whitespace()
        && !r.is_whitespace()
        && !(is_spaceless_script_char(l) && is_spaceless_script_char(r))
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
