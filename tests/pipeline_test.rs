//! End-to-end tests: PDF bytes in, title and outline out.

mod common;

use common::{body_lines, build_pdf, sample_report, Line, BOLD, REGULAR};
use pdfoutline::model::{ERROR_TITLE, UNTITLED};
use pdfoutline::render::{to_json, JsonFormat};
use pdfoutline::{
    extract_outline_bytes, FragmentSource, MemorySource, OutlineExtractor, OutlineNode,
    PdfSource, TextFragment,
};

fn levels_and_texts(nodes: &[OutlineNode]) -> Vec<(String, String, u32)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((node.level.to_string(), node.text.clone(), node.page));
        out.extend(levels_and_texts(&node.children));
    }
    out
}

#[test]
fn test_single_chapter_on_third_page() {
    let pages = vec![
        body_lines(5, 700.0),
        body_lines(5, 700.0),
        {
            let mut page = vec![Line::new(REGULAR, 24.0, 720.0, "Chapter 1: Overview")];
            page.extend(body_lines(5, 690.0));
            page
        },
    ];
    let result = extract_outline_bytes(&build_pdf(&pages)).unwrap();

    assert_eq!(result.outline.len(), 1);
    let chapter = &result.outline[0];
    assert_eq!(chapter.level.to_string(), "H1");
    assert_eq!(chapter.text, "Chapter 1: Overview");
    assert_eq!(chapter.page, 3);
    assert!(chapter.children.is_empty());
}

#[test]
fn test_sample_report_outline() {
    let result = extract_outline_bytes(&sample_report()).unwrap();

    assert_eq!(result.title, "Annual Report");
    assert_eq!(
        levels_and_texts(&result.outline),
        vec![
            ("H1".to_string(), "Annual Report".to_string(), 1),
            ("H2".to_string(), "1. Introduction".to_string(), 1),
            ("H3".to_string(), "1.1 Scope of Work".to_string(), 2),
            ("H2".to_string(), "2. Results".to_string(), 2),
        ]
    );

    let root = &result.outline[0];
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].children.len(), 1);
    assert_eq!(result.heading_count(), 4);
}

#[test]
fn test_sample_report_json_shape() {
    let result = extract_outline_bytes(&sample_report()).unwrap();
    let json = to_json(&result, JsonFormat::Compact).unwrap();

    assert!(json.starts_with(r#"{"title":"Annual Report","outline":[{"level":"H1","text":"Annual Report","page":1,"children":[{"level":"H2""#));
}

#[test]
fn test_blank_document_is_untitled() {
    let result = extract_outline_bytes(&build_pdf(&[Vec::new(), Vec::new()])).unwrap();
    assert_eq!(result.title, UNTITLED);
    assert!(result.outline.is_empty());
}

#[test]
fn test_body_only_document_has_no_outline() {
    let result = extract_outline_bytes(&build_pdf(&[body_lines(10, 700.0)])).unwrap();
    assert!(result.outline.is_empty());
}

#[test]
fn test_bold_heading_at_body_size() {
    let mut page = vec![Line::new(BOLD, 12.0, 720.0, "METHODS AND MATERIALS")];
    page.extend(body_lines(8, 690.0));
    let result = extract_outline_bytes(&build_pdf(&[page])).unwrap();

    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].text, "METHODS AND MATERIALS");
    assert_eq!(result.outline[0].level.to_string(), "H1");
}

#[test]
fn test_pdf_source_reads_fragments() {
    let source = PdfSource::from_bytes(&sample_report()).unwrap();
    assert_eq!(source.page_count(), 2);
    assert_eq!(source.version(), "1.5");

    let first = source.page_fragments(1).unwrap();
    let title = &first[0];
    assert_eq!(title.text, "Annual Report");
    assert_eq!(title.font_size, 24.0);
    assert_eq!(title.font_name, "Helvetica-Bold");
    assert!(title.is_bold);
    assert_eq!(title.page, 1);
    assert_eq!(title.y, 72.0);

    assert!(first[2..].iter().all(|f| f.font_size == 12.0 && !f.is_bold));
    assert!(source.page_fragments(3).is_err());
}

#[test]
fn test_memory_source_matches_pdf_source() {
    let pdf = PdfSource::from_bytes(&sample_report()).unwrap();
    let fragments: Vec<TextFragment> = pdf.fragments().unwrap();
    let memory = MemorySource::from_fragments(fragments);

    let extractor = OutlineExtractor::new();
    assert_eq!(
        extractor.extract(&pdf).unwrap(),
        extractor.extract(&memory).unwrap()
    );
}

#[test]
fn test_corrupt_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.7\nthis is not really a pdf").unwrap();

    let result = pdfoutline::process_file(&path);
    assert_eq!(result.title, ERROR_TITLE);
    assert!(result.outline.is_empty());
}
