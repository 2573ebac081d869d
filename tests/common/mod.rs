//! Shared fixtures: small PDFs generated with lopdf.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Resource key of the regular font.
pub const REGULAR: &str = "F1";
/// Resource key of the bold font.
pub const BOLD: &str = "F2";

/// One line of text drawn at an absolute position.
#[derive(Debug, Clone)]
pub struct Line {
    pub font: &'static str,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

impl Line {
    pub fn new(font: &'static str, size: f32, y: f32, text: &str) -> Self {
        Self {
            font,
            size,
            x: 72.0,
            y,
            text: text.to_string(),
        }
    }
}

/// Body paragraph lines, 14pt apart from `top` downwards.
pub fn body_lines(count: usize, top: f32) -> Vec<Line> {
    (0..count)
        .map(|i| {
            Line::new(
                REGULAR,
                12.0,
                top - 14.0 * i as f32,
                "the quick brown fox jumps over the lazy dog again and again",
            )
        })
        .collect()
}

/// Build a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for line in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![line.font.into(), line.size.into()],
            ));
            operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    REGULAR => regular,
                    BOLD => bold,
                },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save pdf");
    buffer
}

/// A two-page report with a title and numbered sections.
pub fn sample_report() -> Vec<u8> {
    let mut first = vec![Line::new(BOLD, 24.0, 720.0, "Annual Report")];
    first.push(Line::new(BOLD, 18.0, 680.0, "1. Introduction"));
    first.extend(body_lines(6, 650.0));

    let mut second = vec![Line::new(BOLD, 14.0, 720.0, "1.1 Scope of Work")];
    second.extend(body_lines(6, 690.0));
    second.push(Line::new(BOLD, 18.0, 560.0, "2. Results"));
    second.extend(body_lines(4, 530.0));

    build_pdf(&[first, second])
}

/// Write `bytes` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).expect("write fixture");
}
