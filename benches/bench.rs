// Criterion benchmarks for the PetSuite advisor

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use petsuite_advisor::core::{filters::partition, scoring::score_product, Advisor};
use petsuite_advisor::models::{PetProfile, Product, ProductCategory, ScoringPoints, Species};

fn create_candidate(id: usize) -> Product {
    let tags: Vec<String> = match id % 4 {
        0 => vec!["cat".to_string(), "adult".to_string()],
        1 => vec!["cat".to_string(), "senior".to_string()],
        2 => vec!["dog".to_string(), "adult".to_string()],
        _ => vec!["cat".to_string(), "all".to_string()],
    };

    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        description: if id % 5 == 0 {
            "with real chicken".to_string()
        } else {
            "salmon recipe".to_string()
        },
        category: ProductCategory::Food,
        price: 10.0 + (id % 50) as f64,
        tags,
        sold_count: (id % 120) as u32,
    }
}

fn create_pet() -> PetProfile {
    PetProfile {
        name: "Mimi".to_string(),
        species: Species::Cat,
        breed: None,
        age: 3.0,
        weight: None,
        health_score: 85,
        allergies: vec!["chicken".to_string()],
        health_issues: vec![],
        dietary_restrictions: vec![],
    }
}

fn bench_score_product(c: &mut Criterion) {
    let pet = create_pet();
    let points = ScoringPoints::default();
    let product = create_candidate(1);

    c.bench_function("score_product", |b| {
        b.iter(|| score_product(black_box(&product), black_box(&pet), black_box(&points)));
    });
}

fn bench_partition(c: &mut Criterion) {
    let pet = create_pet();
    let candidates: Vec<Product> = (0..100).map(create_candidate).collect();

    c.bench_function("partition_100_candidates", |b| {
        b.iter(|| partition(black_box(candidates.clone()), black_box(&pet.allergies)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let advisor = Advisor::with_default_points();
    let pet = create_pet();

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Product> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    advisor.recommend(
                        black_box(&pet),
                        black_box(candidates.clone()),
                        black_box(5),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_product, bench_partition, bench_recommend);

criterion_main!(benches);
