//! Benchmarks for the search loop.
//!
//! `find` cost is dominated by candidates times permutations, so the
//! enumeration itself is measured separately.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use funcfinder::{catalog, discover_arity, Matcher, Permutation};

/// Whole-catalog search for a two-argument question with a reversed match.
fn bench_find_contains_all(c: &mut Criterion) {
    let catalog = catalog::load().unwrap();
    let matcher = Matcher::new(&catalog);
    let spec = catalog.question("contains_all").unwrap();

    c.bench_function("find_contains_all", |b| {
        b.iter(|| {
            let found = matcher.find(black_box(spec)).unwrap();
            assert!(!found.is_empty());
        });
    });
}

fn bench_find_is_even(c: &mut Criterion) {
    let catalog = catalog::load().unwrap();
    let matcher = Matcher::new(&catalog);
    let spec = catalog.question("is_even").unwrap();

    c.bench_function("find_is_even", |b| {
        b.iter(|| matcher.find(black_box(spec)).unwrap());
    });
}

fn bench_discover_arity(c: &mut Criterion) {
    let catalog = catalog::load().unwrap();
    let spec = catalog.question("transpose").unwrap();

    c.bench_function("discover_arity_transpose", |b| {
        b.iter(|| discover_arity(black_box(spec)).unwrap());
    });
}

/// Lazy enumeration of all 120 orderings of five parameters.
fn bench_permutations_of_five(c: &mut Criterion) {
    c.bench_function("permutations_of_five", |b| {
        b.iter(|| {
            let count = Permutation::all(black_box(5)).count();
            assert_eq!(count, 120);
        });
    });
}

criterion_group!(
    benches,
    bench_find_contains_all,
    bench_find_is_even,
    bench_discover_arity,
    bench_permutations_of_five
);
criterion_main!(benches);
