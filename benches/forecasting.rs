//! Benchmarks for trend analysis and forecasting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kpi_trends::config::KpiType;
use kpi_trends::detection::detect_anomalies;
use kpi_trends::features::analyze_trend;
use kpi_trends::models::{
    auto_forecast, double_exponential_smoothing, linear_trend_forecast,
    simple_exponential_smoothing,
};
use kpi_trends::seasonality::decompose_weekly;
use kpi_trends::transform::moving_average;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn generate_kpi(n: usize) -> Vec<Decimal> {
    KpiType::Efficiency
        .profile()
        .synthesize(n, 42)
        .expect("synthesized values are finite")
}

fn bench_forecasters(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecasters");

    for size in [30, 90, 365].iter() {
        let values = generate_kpi(*size);

        group.bench_with_input(BenchmarkId::new("SES", size), size, |b, _| {
            b.iter(|| simple_exponential_smoothing(black_box(&values), 7, dec!(0.3)))
        });

        group.bench_with_input(BenchmarkId::new("Holt", size), size, |b, _| {
            b.iter(|| double_exponential_smoothing(black_box(&values), 7, dec!(0.3), dec!(0.1)))
        });

        group.bench_with_input(BenchmarkId::new("Linear", size), size, |b, _| {
            b.iter(|| linear_trend_forecast(black_box(&values), 7))
        });

        group.bench_with_input(BenchmarkId::new("Auto", size), size, |b, _| {
            b.iter(|| auto_forecast(black_box(&values), 7))
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for size in [30, 90, 365].iter() {
        let values = generate_kpi(*size);

        group.bench_with_input(BenchmarkId::new("moving_average", size), size, |b, _| {
            b.iter(|| moving_average(black_box(&values), 7))
        });

        group.bench_with_input(BenchmarkId::new("trend", size), size, |b, _| {
            b.iter(|| analyze_trend(black_box(&values)))
        });

        group.bench_with_input(BenchmarkId::new("anomalies", size), size, |b, _| {
            b.iter(|| detect_anomalies(black_box(&values), dec!(2.0)))
        });

        group.bench_with_input(BenchmarkId::new("decompose", size), size, |b, _| {
            b.iter(|| decompose_weekly(black_box(&values)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_forecasters, bench_analysis);
criterion_main!(benches);
