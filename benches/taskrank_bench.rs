//! Criterion benchmarks for u-taskrank scoring.
//!
//! Uses synthetic batches (deterministic, no randomness) to measure the
//! cost of graph analysis and full batch scoring at growing batch sizes.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_taskrank::graph::DependencyGraph;
use u_taskrank::scoring::{ScoringConfig, ScoringEngine, Strategy, Task};

// ===========================================================================
// Synthetic batches
// ===========================================================================

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Tasks with spread-out attributes; every tenth task closes a short cycle.
fn synthetic_batch(n: usize) -> Vec<Task> {
    (1..=n as i64)
        .map(|i| {
            let mut deps = Vec::new();
            if i > 1 {
                deps.push(i - 1);
            }
            if i % 10 == 0 {
                deps.push(i + 1);
            }
            Task::new(format!("task-{i}"))
                .with_id(i)
                .with_importance(i % 10 + 1)
                .with_estimated_hours(0.5 + (i % 16) as f64)
                .with_due_date(reference_date() + Days::new((i % 45) as u64))
                .with_dependencies(deps)
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_cycle_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_detection");

    for &n in &[100usize, 1_000, 10_000] {
        let edges: Vec<(i64, Vec<i64>)> = synthetic_batch(n)
            .into_iter()
            .map(|t| {
                let deps = t.dependencies.iter().filter_map(|d| d.resolve()).collect();
                (t.id.unwrap_or_default(), deps)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &edges, |b, edges| {
            b.iter(|| {
                let graph = DependencyGraph::from_edges(black_box(edges.clone()));
                black_box(graph.cycle_members())
            })
        });
    }
    group.finish();
}

fn bench_score_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_batch");
    group.sample_size(20);

    let engine = ScoringEngine::new(
        ScoringConfig::default()
            .with_strategy(Strategy::SmartBalance)
            .with_today(reference_date()),
    )
    .unwrap();

    for &n in &[100usize, 1_000, 10_000] {
        let batch = synthetic_batch(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &batch, |b, batch| {
            b.iter(|| black_box(engine.score(black_box(batch))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cycle_detection, bench_score_batch);
criterion_main!(benches);
