use criterion::{criterion_group, criterion_main, Criterion};
use symdel::{SymSpell, Verbosity};

const WORDS: &[(&str, i64)] = &[
    ("the", 23_135_851_162),
    ("of", 13_151_942_776),
    ("and", 12_997_637_966),
    ("to", 12_136_980_858),
    ("a", 9_081_174_698),
    ("in", 8_469_404_971),
    ("is", 4_705_743_816),
    ("you", 3_081_151_866),
    ("this", 2_885_734_811),
    ("can", 1_022_775_970),
    ("where", 438_338_274),
    ("over", 299_464_599),
    ("love", 251_686_314),
    ("house", 231_310_420),
    ("take", 204_546_148),
    ("read", 145_174_628),
    ("brown", 76_077_336),
    ("quick", 49_768_339),
    ("dog", 49_747_138),
    ("fox", 24_629_426),
    ("intermediate", 11_612_669),
    ("jumps", 11_605_272),
    ("lazy", 9_529_239),
];

fn build() -> SymSpell {
    let mut symspell = SymSpell::default();
    for &(term, count) in WORDS {
        symspell.create_dictionary_entry(term, count, None);
    }
    symspell
}

fn bench_lookup(c: &mut Criterion) {
    let symspell = build();
    c.bench_function("lookup_closest", |b| {
        b.iter(|| symspell.lookup("intermedaite", Verbosity::Closest, 2, false))
    });
    c.bench_function("lookup_compound", |b| {
        b.iter(|| symspell.lookup_compound("whereis th elove", 2))
    });
    c.bench_function("word_segmentation", |b| {
        b.iter(|| symspell.word_segmentation("thequickbrownfoxjumpsoverthelazydog", 0))
    });
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
