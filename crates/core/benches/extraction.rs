use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use doclens_core::{Document, ExtractConfig, extract_segments, extract_text};

fn docs_fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/docs_page.html").unwrap()
}

/// Repeats the fixture's main content to simulate a long reference page.
fn large_page(sections: usize) -> String {
    let section = r#"
        <h2>Configuration reference</h2>
        <p>Every option accepts a default and can be overridden per widget instance at creation time.</p>
        <ul>
            <li>theme controls the color palette applied to the widget chrome.</li>
            <li>locale selects the translation bundle used for labels.</li>
        </ul>
        <pre>createWidget("root", { theme: "dark", locale: "en" })</pre>
    "#;

    format!("<html><body><main><h1>Widget SDK reference manual</h1>{}</main></body></html>", section.repeat(sections))
}

fn bench_parse(c: &mut Criterion) {
    let small = docs_fixture();
    let large = large_page(200);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "2KB"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "150KB"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_segment_extraction(c: &mut Criterion) {
    let html = large_page(200);
    let doc = Document::parse(&html);
    let config = ExtractConfig::default();

    c.bench_function("segment_extraction", |b| {
        b.iter(|| extract_segments(black_box(&doc), black_box(&config)))
    });
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = docs_fixture();
    let config = ExtractConfig::default();

    c.bench_function("full_extraction", |b| {
        b.iter(|| {
            let doc = Document::parse(black_box(&html));
            extract_text(&doc, &config)
        })
    });
}

criterion_group!(benches, bench_parse, bench_segment_extraction, bench_full_extraction);
criterion_main!(benches);
