use criterion::{Criterion, criterion_group, criterion_main};
use pfmnorm::config::{NormalizeConfig, OutlierPolicy};
use pfmnorm::normalize::estimator::{self, Tail};
use pfmnorm::normalize::rescaler;
use pfmnorm::types::{FloatImage, Range};
use std::hint::black_box;

// 1920x1080 depth map with a repeating ramp and scattered holes
fn synthetic_depth() -> Vec<f32> {
    (0..1920 * 1080)
        .map(|i| if i % 97 == 0 { -1.0 } else { (i % 4093) as f32 * 0.01 })
        .collect()
}

// ============================================================================
// RANGE ESTIMATION
// ============================================================================

fn bench_order_statistic(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_statistic");
    let samples: Vec<f32> = synthetic_depth().into_iter().filter(|&v| v != -1.0).collect();
    let k = estimator::trim_count(samples.len(), 0.02);

    group.bench_function("select_lower_1080p", |b| {
        b.iter_batched_ref(
            || samples.clone(),
            |s| estimator::order_statistic(black_box(s), k, Tail::Lower),
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("full_sort_1080p", |b| {
        b.iter_batched_ref(
            || samples.clone(),
            |s| {
                s.sort_unstable_by(f32::total_cmp);
                black_box(s[k])
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    let samples: Vec<f32> = synthetic_depth().into_iter().filter(|&v| v != -1.0).collect();
    let config = NormalizeConfig::new("in.pfm", "out.pfm")
        .with_epsilon(0.02)
        .unwrap();

    group.bench_function("trimmed_1080p", |b| {
        b.iter_batched_ref(
            || samples.clone(),
            |s| estimator::estimate(black_box(s), &config).unwrap(),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ============================================================================
// RESCALING
// ============================================================================

fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rescale");
    let image = FloatImage::from_values(synthetic_depth());
    let range = Range::new(0.5, 38.0);

    group.bench_function("discard_1080p", |b| {
        b.iter_batched_ref(
            || image.clone(),
            |img| rescaler::rescale(black_box(img), range, -1.0, OutlierPolicy::Discard),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_order_statistic, bench_estimate, bench_rescale);

criterion_main!(benches);
