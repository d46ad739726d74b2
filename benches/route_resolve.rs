use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use harmock::route::{derive_identifier, RouteResolver};

fn templates(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("/api/v1/service{i}/:resource-name/items/:item_id"))
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for count in [1, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let resolver = RouteResolver::new(&templates(count)).unwrap();

            // Worst case: no template matches, numeric fallback runs
            b.iter(|| resolver.resolve(black_box("/api/v1/unmatched/123/items/456")));
        });
    }

    group.finish();
}

fn bench_identifier(c: &mut Criterion) {
    c.bench_function("derive_identifier", |b| {
        b.iter(|| {
            derive_identifier(
                black_box("/dashboard/scan/:container-name/vulnerabilities"),
                black_box("get"),
            )
        });
    });
}

criterion_group!(benches, bench_resolve, bench_identifier);
criterion_main!(benches);
