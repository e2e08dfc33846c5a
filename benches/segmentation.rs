//! Benchmarks for unisegment boundary queries and matcher compilation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unisegment::{CompiledMatcher, Segmenter, TextCursor, UNICODE_16};

const PROSE: &str = "The quick brown fox jumps over the lazy dog. \
    Don't split can't or 3.14, but do split here: \u{05D0}\u{05B7}\"\u{05D1} and \u{30AB}\u{30BF}\u{30AB}\u{30CA}. ";

const EMOJI: &str = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467} \u{1F1EB}\u{1F1F7}\u{1F1E9}\u{1F1EA} \
    \u{1F44D}\u{1F3FD} e\u{301}\u{302} \u{915}\u{94D}\u{937} \u{1100}\u{1161}\u{11A8}\r\n";

fn repeated(text: &str, times: usize) -> Vec<u16> {
    text.repeat(times).encode_utf16().collect()
}

fn bench_build_segmenter(c: &mut Criterion) {
    c.bench_function("build_segmenter", |b| {
        b.iter(|| Segmenter::new(black_box(&UNICODE_16)).unwrap())
    });
}

fn bench_compile_matcher(c: &mut Criterion) {
    let ranges = UNICODE_16.word_break.entry("ALetter").unwrap_or_default();
    c.bench_function("compile_aletter", |b| {
        b.iter(|| CompiledMatcher::compile(black_box(ranges).iter().copied()).unwrap())
    });
}

fn bench_split_clusters(c: &mut Criterion) {
    let segmenter = Segmenter::shared().unwrap();
    let prose = repeated(PROSE, 20);
    let emoji = repeated(EMOJI, 20);

    c.bench_function("split_clusters_prose", |b| {
        b.iter(|| segmenter.split_clusters(black_box(&prose)).len())
    });
    c.bench_function("split_clusters_emoji", |b| {
        b.iter(|| segmenter.split_clusters(black_box(&emoji)).len())
    });
}

fn bench_word_breaks(c: &mut Criterion) {
    let segmenter = Segmenter::shared().unwrap();
    let prose = repeated(PROSE, 20);

    c.bench_function("word_breaks", |b| {
        b.iter(|| segmenter.word().breaks(black_box(&prose)).len())
    });

    c.bench_function("word_caret_alphanumeric", |b| {
        let cursor = TextCursor::new(&prose);
        b.iter(|| {
            let mut pos = 0;
            while pos < cursor.len() {
                pos = segmenter.word().next_break_offset(&cursor, pos, true);
            }
            black_box(pos)
        })
    });
}

fn bench_long_extend_run(c: &mut Criterion) {
    let text: Vec<u16> = std::iter::once(0x61)
        .chain(std::iter::repeat(0x301).take(2000))
        .chain(std::iter::once(0x62))
        .collect();
    let segmenter = Segmenter::shared().unwrap();

    c.bench_function("long_extend_run", |b| {
        b.iter(|| segmenter.is_word_break(black_box(&text), text.len() - 1))
    });
}

criterion_group!(
    benches,
    bench_build_segmenter,
    bench_compile_matcher,
    bench_split_clusters,
    bench_word_breaks,
    bench_long_extend_run,
);

criterion_main!(benches);
