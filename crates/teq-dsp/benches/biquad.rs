//! Biquad and cut-cascade benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use teq_dsp::MonoProcessor;
use teq_dsp::biquad::{BiquadCoeffs, BiquadTDF2};
use teq_dsp::chain::CutFilter;
use teq_dsp::design::low_cut_coefficients;
use teq_dsp::params::FilterSlope;

fn bench_biquad_scalar(c: &mut Criterion) {
    let mut filter = BiquadTDF2::new();
    filter.set_coeffs(BiquadCoeffs::peaking(750.0, 1.0, 6.0, 48000.0));

    let mut buffer: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.01).sin()).collect();

    c.bench_function("biquad_scalar_1024", |b| {
        b.iter(|| {
            filter.process_block(black_box(&mut buffer));
        })
    });
}

fn bench_cut_cascade_48db(c: &mut Criterion) {
    let mut cascade = CutFilter::new();
    cascade.configure(
        &low_cut_coefficients(120.0, FilterSlope::Db48, 48000.0),
        FilterSlope::Db48,
    );

    let mut buffer: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.01).sin()).collect();

    c.bench_function("cut_cascade_48db_1024", |b| {
        b.iter(|| {
            cascade.process_block(black_box(&mut buffer));
        })
    });
}

criterion_group!(benches, bench_biquad_scalar, bench_cut_cascade_48db);
criterion_main!(benches);
