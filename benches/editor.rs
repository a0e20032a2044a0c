//! Microbenchmarks for the query editor pipeline.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neuroq::query::{normalize, remove_term_at, tokens};

const QUERY: &str =
    "( [ -22, -4, 18 ] OR amygdala ) AND NOT emotion OR ( fear AND [0, 0, 0] )";

const MESSY_QUERY: &str = "AND OR ( ) amygdala AND AND fear NOT OR ( ( ) ) NOT";

fn bench_tokenize_classify(c: &mut Criterion) {
    c.bench_function("tokenize_classify", |b| {
        b.iter(|| tokens(black_box(QUERY)))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let toks = tokens(MESSY_QUERY);
    c.bench_function("normalize_messy", |b| {
        b.iter(|| normalize(black_box(toks.clone())))
    });

    let clean = normalize(tokens(QUERY));
    c.bench_function("normalize_fixed_point", |b| {
        b.iter(|| normalize(black_box(clean.clone())))
    });
}

fn bench_remove_term(c: &mut Criterion) {
    let toks = tokens(QUERY);
    let idx = toks
        .iter()
        .position(|t| t.text == "amygdala")
        .expect("term present");
    c.bench_function("remove_term", |b| {
        b.iter(|| remove_term_at(black_box(toks.clone()), idx))
    });
}

criterion_group!(
    benches,
    bench_tokenize_classify,
    bench_normalize,
    bench_remove_term
);
criterion_main!(benches);
