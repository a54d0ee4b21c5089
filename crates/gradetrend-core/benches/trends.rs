use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradetrend_core::model::Evaluation;
use gradetrend_core::normalizer::{normalize_course, RawCourse, RawEvaluation};
use gradetrend_core::trends::{compute_required_trend, compute_trends};

fn make_evaluations(n: usize) -> Vec<Evaluation> {
    (0..n)
        .map(|i| {
            let total = 10.0 + (i % 7) as f64 * 5.0;
            if i % 3 == 2 {
                Evaluation::pending(format!("Eval {i}"), total)
            } else {
                Evaluation::completed(format!("Eval {i}"), total * 0.75, total)
            }
        })
        .collect()
}

fn bench_compute_trends(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_trends");

    for n in [10, 100, 1000] {
        let evals = make_evaluations(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| compute_trends(black_box(&evals)))
        });
    }

    group.finish();
}

fn bench_required_trend(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_required_trend");
    let evals = make_evaluations(100);

    group.bench_function("target=50", |b| {
        b.iter(|| compute_required_trend(black_box(&evals), black_box(50.0)))
    });

    group.bench_function("target=90", |b| {
        b.iter(|| compute_required_trend(black_box(&evals), black_box(90.0)))
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let raw = RawCourse {
        id: "bench".into(),
        name: "Bench".into(),
        evaluations: (0..100)
            .map(|i| RawEvaluation {
                subtitle: Some("Quiz".into()),
                label: Some(format!("Week {i}")),
                score: Some(if i % 4 == 0 { "-".into() } else { "7.5".into() }),
                total: Some("10".into()),
            })
            .collect(),
    };

    c.bench_function("normalize_course/n=100", |b| {
        b.iter(|| normalize_course(black_box(&raw)))
    });
}

criterion_group!(benches, bench_compute_trends, bench_required_trend, bench_normalize);
criterion_main!(benches);
