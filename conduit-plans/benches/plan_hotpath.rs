use conduit_core::{Category, ExecutionContext};
use conduit_plans::{resolve_plan, ImpactEstimator};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_plan_resolution(c: &mut Criterion) {
    let categories = [
        Category::Foundation,
        Category::Technical,
        Category::Monitoring,
        Category::from_label("infra"),
    ];

    c.bench_function("plans/resolve_mixed", |b| {
        b.iter(|| {
            for category in &categories {
                let plan = resolve_plan(black_box(category), black_box("4.0"));
                black_box(plan.steps.len());
            }
        });
    });
}

fn bench_estimate(c: &mut Criterion) {
    let estimator = ImpactEstimator::default();
    let context = ExecutionContext::new(Category::Technical, "4.0", "Credit Repair Service")
        .with_layer(3)
        .with_timing("30-day implementation")
        .with_resources("High technical resources available");

    c.bench_function("plans/estimate", |b| {
        b.iter(|| {
            let scores = estimator.estimate(black_box(&context));
            black_box(scores.cross_domain_impact.tier);
        });
    });
}

criterion_group!(benches, bench_plan_resolution, bench_estimate);
criterion_main!(benches);
