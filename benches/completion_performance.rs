//! Benchmark suite for editor completion
//!
//! This benchmark measures:
//! - Global prefix matching with various catalog sizes
//! - Member matching (dotted words) with various catalog sizes
//! - The full suggestion pipeline on the built-in catalog

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nexus_console::integration::completion::{PrefixCompletionMatcher, SymbolCatalog, SymbolEntry};

/// Generate a catalog with `size` globals, each owning a handful of members
fn generate_catalog(size: usize) -> SymbolCatalog {
    let globals = (0..size).map(|i| SymbolEntry::global(format!("object{:05}", i))).collect();
    let members = (0..size)
        .flat_map(|i| {
            let prefix = format!("object{:05}.", i);
            ["get", "set", "list", "delete"]
                .into_iter()
                .map(move |name| SymbolEntry::member(prefix.clone(), name))
        })
        .collect();
    SymbolCatalog::new(globals, members)
}

fn bench_global_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_matching");

    for size in &[10, 100, 1000, 10000] {
        let catalog = generate_catalog(*size);
        let matcher = PrefixCompletionMatcher::new(&catalog);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("prefix", size), &matcher, |b, m| {
            b.iter(|| m.complete(black_box("var x = object000"), 17));
        });
    }

    group.finish();
}

fn bench_member_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("member_matching");

    for size in &[10, 100, 1000, 10000] {
        let catalog = generate_catalog(*size);
        let matcher = PrefixCompletionMatcher::new(&catalog);

        group.throughput(Throughput::Elements((*size * 4) as u64));
        group.bench_with_input(BenchmarkId::new("dotted", size), &matcher, |b, m| {
            b.iter(|| m.complete(black_box("object00007.se"), 14));
        });
    }

    group.finish();
}

fn bench_builtin_suggest(c: &mut Criterion) {
    let matcher = PrefixCompletionMatcher::builtin();
    let line = r#"var rows = datastore.query("events", req"#;

    c.bench_function("builtin_suggest", |b| {
        b.iter(|| matcher.suggest(black_box(line), line.len()));
    });
}

criterion_group!(benches, bench_global_matching, bench_member_matching, bench_builtin_suggest);
criterion_main!(benches);
