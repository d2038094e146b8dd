use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phonogram::{Grammar, UtteranceConfig, PLAINS_CREE};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse plains cree", |b| {
        b.iter(|| black_box(PLAINS_CREE).parse::<Grammar>().unwrap())
    });
}

fn bench_generate(c: &mut Criterion) {
    let grammar: Grammar = PLAINS_CREE.parse().unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("generate syllable", |b| {
        b.iter(|| grammar.generate_with(&mut rng).unwrap())
    });
}

fn bench_assemble(c: &mut Criterion) {
    let grammar: Grammar = PLAINS_CREE.parse().unwrap();
    let config = UtteranceConfig::default();
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("assemble word", |b| {
        b.iter(|| phonogram::assemble_with(&grammar, &config, &mut rng).unwrap())
    });
}

fn bench_pattern(c: &mut Criterion) {
    let grammar: Grammar = PLAINS_CREE.parse().unwrap();
    c.bench_function("compile pattern", |b| b.iter(|| grammar.to_pattern().unwrap()));
}

criterion_group!(benches, bench_parse, bench_generate, bench_assemble, bench_pattern);
criterion_main!(benches);
