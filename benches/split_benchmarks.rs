use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use idsplit::{
    Dictionary, FrequencyTable, KnowledgeBase, SpecialTerms, Splitter, SplitterConfig, SplitterKind,
};

const IDENTIFIERS: &[&str] = &[
    "getUtf8Octets",
    "mStartCData",
    "nonnegativedecimaltype",
    "GPSmodule",
    "readIPv4addr",
    "usage_getdata",
    "ABCFooBarBaz",
    "somevariablename",
];

fn knowledge_base() -> KnowledgeBase {
    let pairs = [
        ("get", 800_000u64),
        ("set", 500_000),
        ("data", 250_000),
        ("start", 90_000),
        ("module", 60_000),
        ("octets", 3_000),
        ("read", 300_000),
        ("addr", 40_000),
        ("usage", 15_000),
        ("some", 40_000),
        ("variable", 70_000),
        ("name", 350_000),
        ("foo", 30_000),
        ("bar", 25_000),
        ("baz", 9_000),
        ("non", 3_000),
        ("negative", 9_000),
        ("nonnegative", 500),
        ("decimal", 6_000),
        ("type", 300_000),
        ("gps", 2_000),
        ("a", 5_000),
        ("m", 4_000),
    ];
    let words: Vec<&str> = pairs.iter().map(|(w, _)| *w).filter(|w| w.len() > 2).collect();

    KnowledgeBase::new(
        FrequencyTable::from_pairs(pairs),
        Dictionary::from_words(words).unwrap(),
        SpecialTerms::builtin().clone(),
    )
}

fn bench_lexical(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexical");
    for kind in SplitterKind::ALL {
        let Some(split) = kind.lexical() else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(kind), &IDENTIFIERS, |b, ids| {
            b.iter(|| {
                for id in ids.iter() {
                    black_box(split(black_box(id)));
                }
            })
        });
    }
    group.finish();
}

fn bench_frequency_guided(c: &mut Criterion) {
    let kb = knowledge_base();
    let mut group = c.benchmark_group("frequency_guided");

    for (name, config) in [
        ("ronin", SplitterConfig::default()),
        ("samurai", SplitterConfig::samurai()),
    ] {
        let splitter = Splitter::new(&kb).with_config(config);
        for id in IDENTIFIERS {
            group.bench_with_input(BenchmarkId::new(name, id), id, |b, id| {
                b.iter(|| black_box(splitter.split(black_box(id))))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_lexical, bench_frequency_guided);
criterion_main!(benches);
