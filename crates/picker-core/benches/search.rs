use std::collections::HashSet;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use picker_core::alias::AliasIndex;
use picker_core::catalog::{Catalog, EmojiEntry};
use picker_core::search::{find_match, RANKED_PASSES};

const WORDS: &[&str] = &[
    "face", "smiling", "grinning", "cat", "heart", "hand", "sun", "moon", "star", "tree",
    "flag", "person", "raising", "tears", "joy", "fire", "water", "red", "blue", "green",
];

fn bench_catalog() -> (Catalog, AliasIndex) {
    let mut emojis = Vec::new();
    let mut aliases = AliasIndex::new();
    for i in 0..4000 {
        let name = format!(
            "{} {} {}",
            WORDS[i % WORDS.len()],
            WORDS[(i / 7) % WORDS.len()],
            i
        );
        let code = format!("e{i}");
        if i % 3 == 0 {
            aliases.insert(&code, WORDS[(i / 3) % WORDS.len()]);
        }
        emojis.push(EmojiEntry::new(&name, &code, (i % 15) as i32));
    }
    (Catalog::new(emojis, vec![]).unwrap(), aliases)
}

fn ranked(catalog: &Catalog, aliases: &AliasIndex, query: &str) -> usize {
    let mut seen: HashSet<&str> = HashSet::new();
    for mode in RANKED_PASSES {
        for e in catalog.emojis() {
            if seen.contains(e.code.as_str()) {
                continue;
            }
            if find_match(&e.name, aliases.aliases_for(&e.code), query, mode).is_some() {
                seen.insert(&e.code);
            }
        }
    }
    seen.len()
}

fn bench_ranked_search(c: &mut Criterion) {
    let (catalog, aliases) = bench_catalog();
    let mut group = c.benchmark_group("ranked_search");
    for query in ["f", "sm", "heart", "tears joy", "zzz"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, q| {
            b.iter(|| ranked(&catalog, &aliases, q))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ranked_search);
criterion_main!(benches);
