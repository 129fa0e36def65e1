//! Micro-benchmarks for the heading detection path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skimpdf::outline::{detect_headings, ScoreWeights};
use skimpdf::{BBox, TextElement};

fn synthetic_page_elements(pages: u32, lines_per_page: u32) -> Vec<TextElement> {
    let mut elements = Vec::new();

    for page in 1..=pages {
        elements.push(TextElement::new(
            format!("{page} Section Heading For Page {page}"),
            page,
            18.0,
            true,
            BBox::new(72.0, 72.0, 400.0, 90.0),
        ));

        for i in 0..lines_per_page {
            let y = 100.0 + 14.0 * i as f32;
            elements.push(TextElement::new(
                format!("body line {i} with a typical amount of prose on page {page}"),
                page,
                10.0,
                false,
                BBox::new(72.0, y, 520.0, y + 10.0),
            ));
        }
    }

    elements
}

fn bench_detect_headings(c: &mut Criterion) {
    let weights = ScoreWeights::default();

    let small = synthetic_page_elements(5, 40);
    c.bench_function("detect_headings_5_pages", |b| {
        b.iter(|| detect_headings(black_box(small.clone()), None, black_box(&weights)))
    });

    let large = synthetic_page_elements(50, 40);
    c.bench_function("detect_headings_50_pages", |b| {
        b.iter(|| detect_headings(black_box(large.clone()), None, black_box(&weights)))
    });
}

criterion_group!(benches, bench_detect_headings);
criterion_main!(benches);
