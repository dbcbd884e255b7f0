use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pokedex_sql::{SQLStore, SqliteStore};
use pokemon::model::CreatePokemon;
use pokemon::service::{PokemonService, Term};

fn seeded_service() -> (PokemonService, String) {
    let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    let svc = PokemonService::new(sql, 20).unwrap();
    let batch = (1..=1000)
        .map(|i| CreatePokemon::new(i, format!("species-{:04}", i)))
        .collect();
    svc.insert_many(batch).unwrap();
    let id = svc.find_one("500").unwrap().id;
    (svc, id)
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_terms", |b| {
        b.iter(|| {
            black_box(Term::classify(black_box("0025")));
            black_box(Term::classify(black_box("0123456789abcdef0123456789abcdef")));
            black_box(Term::classify(black_box("pikachu")));
        });
    });
}

fn bench_resolve_by_code(c: &mut Criterion) {
    let (svc, _) = seeded_service();
    c.bench_function("resolve_by_code", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let term = ((i % 1000) + 1).to_string();
            let _ = svc.find_one(black_box(&term)).unwrap();
            i += 1;
        });
    });
}

fn bench_resolve_by_id(c: &mut Criterion) {
    let (svc, id) = seeded_service();
    c.bench_function("resolve_by_id", |b| {
        b.iter(|| {
            let _ = svc.find_one(black_box(&id)).unwrap();
        });
    });
}

fn bench_resolve_by_name(c: &mut Criterion) {
    let (svc, _) = seeded_service();
    c.bench_function("resolve_by_name", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let term = format!("species-{:04}", (i % 1000) + 1);
            let _ = svc.find_one(black_box(&term)).unwrap();
            i += 1;
        });
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_resolve_by_code,
    bench_resolve_by_id,
    bench_resolve_by_name,
);
criterion_main!(benches);
