use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use language_plz::{LanguageRange, Negotiator};

const HEADER: &str = "fr-CA,fr;q=0.9,en-US;q=0.8,en;q=0.7,de-AT;q=0.6,*;q=0.1";

const AVAILABLE: [&str; 8] =
    ["ar", "de", "de-AT", "en", "en-GB", "en-US", "es", "fr"];

fn bench_parse_list(c: &mut Criterion) {
    c.bench_function("parse accept-language", |b| {
        b.iter(|| LanguageRange::parse_list(black_box(HEADER)))
    });
}

fn bench_negotiate(c: &mut Criterion) {
    let negotiator = Negotiator::parse(AVAILABLE).unwrap();
    let ranges = LanguageRange::parse_list(HEADER).unwrap();
    c.bench_function("negotiate", |b| {
        b.iter(|| negotiator.select(black_box(&ranges)).len())
    });
}

criterion_group!(benches, bench_parse_list, bench_negotiate);
criterion_main!(benches);
