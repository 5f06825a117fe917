//! Coefficient design for the three EQ bands
//!
//! Pure functions from a parameter snapshot to biquad coefficients. The peak
//! band is a single RBJ peaking section; the cut bands are cascades of
//! 2nd-order Butterworth sections, one section per 12 dB/oct of slope.
//!
//! Caller contract for every function here: `20.0 <= freq <= 20000.0` and
//! `sample_rate > 0`. The parameter store clamps at the write side, so no
//! re-validation happens on this (audio-thread) path. Deterministic given
//! identical inputs on one platform.

use crate::biquad::BiquadCoeffs;
use crate::params::FilterSlope;

/// Maximum sections in a cut cascade (48 dB/oct)
pub const MAX_CUT_STAGES: usize = 4;

/// Coefficient sets for one cut cascade, in processing order
///
/// Fixed-capacity so coefficient design never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutCoeffs {
    sections: [BiquadCoeffs; MAX_CUT_STAGES],
    len: usize,
}

impl CutCoeffs {
    /// Active coefficient sets, `slope.stages()` of them
    #[inline]
    pub fn sections(&self) -> &[BiquadCoeffs] {
        &self.sections[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Peaking-band coefficients from a parameter snapshot
pub fn peak_coefficients(freq: f64, q: f64, gain_db: f64, sample_rate: f64) -> BiquadCoeffs {
    BiquadCoeffs::peaking(freq, q, gain_db, sample_rate)
}

/// Low-cut (highpass) cascade coefficients
///
/// `slope.stages()` Butterworth highpass sections at the same cutoff with
/// the section Q table for order `2 * stages`.
pub fn low_cut_coefficients(freq: f64, slope: FilterSlope, sample_rate: f64) -> CutCoeffs {
    cut_coefficients(freq, slope, sample_rate, BiquadCoeffs::highpass)
}

/// High-cut (lowpass) cascade coefficients
pub fn high_cut_coefficients(freq: f64, slope: FilterSlope, sample_rate: f64) -> CutCoeffs {
    cut_coefficients(freq, slope, sample_rate, BiquadCoeffs::lowpass)
}

fn cut_coefficients(
    freq: f64,
    slope: FilterSlope,
    sample_rate: f64,
    section: fn(f64, f64, f64) -> BiquadCoeffs,
) -> CutCoeffs {
    let qs = slope.butterworth_qs();
    let mut sections = [BiquadCoeffs::identity(); MAX_CUT_STAGES];
    for (dst, &q) in sections.iter_mut().zip(qs) {
        *dst = section(freq, q, sample_rate);
    }
    CutCoeffs {
        sections,
        len: qs.len(),
    }
}
