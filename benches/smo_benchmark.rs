//! Benchmarks for SMO training and prediction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rsmo::api::SVM;
use rsmo::{LinearKernel, SVMModel, TrainingSet};

/// Two overlapping clusters in `dim` dimensions
fn make_dataset(n: usize, dim: usize) -> TrainingSet {
    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let label = if i % 2 == 0 { 1.0 } else { -1.0 };
        let t = i as f64;
        let row = (0..dim)
            .map(|k| label * 0.8 + ((t + 1.0) * (k as f64 + 1.3)).sin())
            .collect();
        features.push(row);
        labels.push(label);
    }
    TrainingSet::new(features, labels).unwrap()
}

fn bench_smo_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("smo_train");
    group.sample_size(20);

    for size in [50, 100, 200, 400].iter() {
        let data = make_dataset(*size, 5);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                SVM::new()
                    .with_c(1.0)
                    .with_seed(42)
                    .train(black_box(data.clone()))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_smo_regularization(c: &mut Criterion) {
    let mut group = c.benchmark_group("smo_regularization");
    group.sample_size(20);
    let data = make_dataset(200, 5);

    for c_value in [0.1, 1.0, 10.0].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(c_value), c_value, |b, &c_value| {
            b.iter(|| {
                SVM::new()
                    .with_c(c_value)
                    .with_seed(42)
                    .train(black_box(data.clone()))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    for size in [50, 200].iter() {
        let data = make_dataset(*size, 5);
        let model = SVM::<LinearKernel>::new()
            .with_seed(42)
            .train(data.clone())
            .unwrap();
        let primal = model.linear_params();
        let rows: Vec<Vec<f64>> = data.samples().iter().map(|s| s.features.clone()).collect();

        group.bench_with_input(BenchmarkId::new("dual", size), size, |b, _| {
            b.iter(|| model.predict_batch(black_box(&rows)));
        });
        group.bench_with_input(BenchmarkId::new("primal", size), size, |b, _| {
            b.iter(|| {
                rows.iter()
                    .map(|row| primal.decision_function(black_box(row)))
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_smo_train, bench_smo_regularization, bench_predict);
criterion_main!(benches);
