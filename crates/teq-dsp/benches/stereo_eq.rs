//! Full stereo EQ block benchmarks

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use teq_dsp::StereoProcessor;
use teq_dsp::params::{EqParams, FilterSlope};
use teq_dsp::processor::StereoEq;

fn bench_stereo_block(c: &mut Criterion) {
    let params = Arc::new(EqParams::new());
    params.set_low_cut_freq(80.0);
    params.set_low_cut_slope(FilterSlope::Db48);
    params.set_peak_gain_db(6.0);
    params.set_high_cut_freq(12000.0);
    params.set_high_cut_slope(FilterSlope::Db48);

    let mut eq = StereoEq::new(params);
    eq.prepare(48000.0, 1024).unwrap();

    let mut left: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.01).sin()).collect();
    let mut right = left.clone();

    c.bench_function("stereo_eq_block_1024", |b| {
        b.iter(|| {
            eq.process_block(black_box(&mut left), black_box(&mut right));
        })
    });
}

fn bench_update_filters(c: &mut Criterion) {
    let params = Arc::new(EqParams::new());
    params.set_low_cut_slope(FilterSlope::Db48);
    params.set_high_cut_slope(FilterSlope::Db48);

    let mut eq = StereoEq::new(params);
    eq.prepare(48000.0, 1024).unwrap();

    c.bench_function("update_filters", |b| {
        b.iter(|| {
            eq.update_filters();
        })
    });
}

criterion_group!(benches, bench_stereo_block, bench_update_filters);
criterion_main!(benches);
