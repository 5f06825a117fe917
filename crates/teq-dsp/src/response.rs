//! Analytic frequency-response evaluation
//!
//! Evaluates H(z) at z = e^(jω) directly from biquad coefficients. This is
//! the display/measurement side of the EQ: the response-curve view and the
//! test suite both design their own coefficients from a snapshot and never
//! touch audio-thread filter state. Control-rate only; allocation is fine
//! here.

use std::f64::consts::PI;

use teq_core::gain_to_db;

use crate::biquad::BiquadCoeffs;
use crate::design::{high_cut_coefficients, low_cut_coefficients, peak_coefficients};
use crate::params::ChainSettings;

/// Magnitude and phase of one biquad at `freq`
///
/// Evaluates H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
/// at z = e^(jω) where ω = 2πf/fs.
pub fn response_at(coeffs: &BiquadCoeffs, freq: f64, sample_rate: f64) -> (f64, f64) {
    let omega = 2.0 * PI * freq / sample_rate;
    let cos_w = omega.cos();
    let sin_w = omega.sin();
    let cos_2w = (2.0 * omega).cos();
    let sin_2w = (2.0 * omega).sin();

    // z^-1 = cos(ω) - j*sin(ω), z^-2 = cos(2ω) - j*sin(2ω)
    let num_real = coeffs.b0 + coeffs.b1 * cos_w + coeffs.b2 * cos_2w;
    let num_imag = -coeffs.b1 * sin_w - coeffs.b2 * sin_2w;

    let den_real = 1.0 + coeffs.a1 * cos_w + coeffs.a2 * cos_2w;
    let den_imag = -coeffs.a1 * sin_w - coeffs.a2 * sin_2w;

    let den_mag_sq = den_real * den_real + den_imag * den_imag;

    let h_real = (num_real * den_real + num_imag * den_imag) / den_mag_sq;
    let h_imag = (num_imag * den_real - num_real * den_imag) / den_mag_sq;

    let magnitude = (h_real * h_real + h_imag * h_imag).sqrt();
    let phase = h_imag.atan2(h_real);

    (magnitude, phase)
}

/// Magnitude of one biquad at `freq`
#[inline]
pub fn magnitude_at(coeffs: &BiquadCoeffs, freq: f64, sample_rate: f64) -> f64 {
    response_at(coeffs, freq, sample_rate).0
}

/// Magnitude of the full chain at `freq`, designed fresh from a snapshot
///
/// Product over the peak section and every active section of both cut
/// cascades, mirroring the audio-side topology exactly.
pub fn chain_magnitude(settings: &ChainSettings, freq: f64, sample_rate: f64) -> f64 {
    let peak = peak_coefficients(
        settings.peak_freq,
        settings.peak_q,
        settings.peak_gain_db,
        sample_rate,
    );
    let low_cut = low_cut_coefficients(settings.low_cut_freq, settings.low_cut_slope, sample_rate);
    let high_cut =
        high_cut_coefficients(settings.high_cut_freq, settings.high_cut_slope, sample_rate);

    let mut magnitude = magnitude_at(&peak, freq, sample_rate);
    for section in low_cut.sections() {
        magnitude *= magnitude_at(section, freq, sample_rate);
    }
    for section in high_cut.sections() {
        magnitude *= magnitude_at(section, freq, sample_rate);
    }
    magnitude
}

/// Response curve for display: log-spaced (frequency, dB) points, 20 Hz-20 kHz
pub fn response_curve(
    settings: &ChainSettings,
    sample_rate: f64,
    num_points: usize,
) -> Vec<(f64, f64)> {
    let mut curve = Vec::with_capacity(num_points);

    let log_min = 20.0_f64.log10();
    let log_max = 20000.0_f64.log10();

    for i in 0..num_points {
        let t = i as f64 / (num_points - 1) as f64;
        let freq = 10.0_f64.powf(log_min + t * (log_max - log_min));
        let db = gain_to_db(chain_magnitude(settings, freq, sample_rate));
        curve.push((freq, db));
    }

    curve
}
