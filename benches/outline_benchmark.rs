//! Benchmarks for the outline pipeline.
//!
//! Run with: cargo bench
//!
//! Documents are synthesized as fragments so the numbers measure the
//! heuristics, not PDF parsing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdfoutline::model::{HeadingLevel, LeveledHeading};
use pdfoutline::outline::{body_style, build_outline};
use pdfoutline::{OutlineExtractor, TextFragment};

const BODY: &str = "the quick brown fox jumps over the lazy dog";

/// A document of `pages` pages, each opening with a numbered section.
fn synthetic_fragments(pages: u32) -> Vec<TextFragment> {
    let mut fragments = Vec::new();
    for page in 1..=pages {
        fragments.push(
            TextFragment::new(format!("{}. Section Heading", page), 18.0, "Helvetica-Bold", page)
                .at(72.0, 60.0),
        );
        if page % 3 == 0 {
            fragments.push(
                TextFragment::new(format!("{}.1 Details", page), 14.0, "Helvetica-Bold", page)
                    .at(72.0, 100.0),
            );
        }
        for line in 0..40 {
            fragments.push(
                TextFragment::new(BODY, 11.0, "Helvetica", page).at(72.0, 120.0 + line as f32 * 14.0),
            );
        }
    }
    fragments
}

fn synthetic_headings(count: usize) -> Vec<LeveledHeading> {
    (0..count)
        .map(|i| LeveledHeading {
            text: format!("Heading {}", i),
            page: (i / 10) as u32 + 1,
            font_size: 12.0,
            level: HeadingLevel::new([1, 2, 3, 2, 3, 3][i % 6]),
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_pipeline");
    let extractor = OutlineExtractor::new();

    for pages in [1u32, 10, 100] {
        let fragments = synthetic_fragments(pages);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &fragments, |b, f| {
            b.iter(|| extractor.outline_from_fragments(black_box(f)));
        });
    }

    group.finish();
}

fn bench_body_style(c: &mut Criterion) {
    let fragments = synthetic_fragments(100);
    c.bench_function("body_style_100_pages", |b| {
        b.iter(|| body_style(black_box(&fragments)));
    });
}

fn bench_build_outline(c: &mut Criterion) {
    let headings = synthetic_headings(1000);
    c.bench_function("build_outline_1000", |b| {
        b.iter(|| build_outline(black_box(&headings)));
    });
}

criterion_group!(benches, bench_pipeline, bench_body_style, bench_build_outline);
criterion_main!(benches);
