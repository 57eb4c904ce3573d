use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use letterbox_core::{Document, Extractor, PreprocessConfig, preprocess_html, run_pipeline};

const FIXTURES: [&str; 3] = ["digest_sections.html", "link_list.html", "essay.html"];

fn load(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for name in FIXTURES {
        let html = load(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_preprocess(c: &mut Criterion) {
    let html = load("digest_sections.html");
    let config = PreprocessConfig::default();

    c.bench_function("preprocess", |b| b.iter(|| preprocess_html(black_box(&html), &config)));
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for name in FIXTURES {
        let doc = Document::parse(&load(name));
        group.bench_function(BenchmarkId::from_parameter(name), |b| b.iter(|| run_pipeline(black_box(&doc))));
    }

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let extractor = Extractor::new();
    let mut group = c.benchmark_group("extract_from_email");

    for name in FIXTURES {
        let html = load(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &html, |b, html| {
            b.iter(|| extractor.extract_from_email(black_box(html), "Tech Daily", "digest@techdaily.example.com", ""))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_preprocess, bench_pipeline, bench_full_extraction);
criterion_main!(benches);
