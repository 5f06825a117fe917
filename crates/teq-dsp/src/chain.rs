//! Cut-filter cascade and the per-channel filter chain
//!
//! A cut filter is a fixed array of 4 biquad stages; the selected slope
//! decides how many are active, the rest stay bypassed in place. The channel
//! chain pipes low cut -> peak -> high cut, in that order, for one channel.

use teq_core::Sample;

use crate::biquad::{BiquadCoeffs, BiquadTDF2};
use crate::design::{CutCoeffs, MAX_CUT_STAGES};
use crate::params::FilterSlope;
use crate::{MonoProcessor, Processor};

/// Cascade of up to 4 biquad stages realizing a 12-48 dB/oct cut
///
/// The stage array is static; activation is dynamic. Stages at or beyond the
/// active count are bypassed, never removed, so slope changes never
/// reallocate.
#[derive(Debug, Clone)]
pub struct CutFilter {
    stages: [BiquadTDF2; MAX_CUT_STAGES],
}

impl CutFilter {
    /// All stages start bypassed: an unconfigured cascade is pass-through.
    pub fn new() -> Self {
        let mut stages = [
            BiquadTDF2::new(),
            BiquadTDF2::new(),
            BiquadTDF2::new(),
            BiquadTDF2::new(),
        ];
        for stage in &mut stages {
            stage.set_bypassed(true);
        }
        Self { stages }
    }

    /// Install cascade coefficients and set the active stage count
    ///
    /// Exactly the stages below `slope.stages()` receive new coefficients
    /// and are enabled; every stage at or above the count is bypassed in the
    /// same call. A slope decrease therefore silences the now-surplus stages
    /// atomically with the new stage-0 coefficients; there is no
    /// intermediate state where a stale stage stays audible.
    pub fn configure(&mut self, coeffs: &CutCoeffs, slope: FilterSlope) {
        let active = slope.stages();
        debug_assert_eq!(coeffs.len(), active);

        for (i, stage) in self.stages.iter_mut().enumerate() {
            if i < active {
                stage.set_coeffs(coeffs.sections()[i]);
                stage.set_bypassed(false);
            } else {
                stage.set_bypassed(true);
            }
        }
    }

    /// Number of currently active (non-bypassed) stages
    pub fn active_stages(&self) -> usize {
        self.stages.iter().filter(|s| !s.is_bypassed()).count()
    }

    /// Bypass state of one stage
    pub fn stage_bypassed(&self, index: usize) -> bool {
        self.stages[index].is_bypassed()
    }

    /// Coefficients currently installed in one stage
    pub fn stage_coeffs(&self, index: usize) -> &BiquadCoeffs {
        self.stages[index].coeffs()
    }
}

impl Default for CutFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for CutFilter {
    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

impl MonoProcessor for CutFilter {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        let mut out = input;
        for stage in &mut self.stages {
            out = stage.process_sample(out);
        }
        out
    }
}

/// Per-channel filter pipeline: low cut -> peak -> high cut
///
/// Processing order is fixed; it determines how overlapping band edges
/// interact and must match on both channels.
#[derive(Debug, Clone, Default)]
pub struct ChannelChain {
    low_cut: CutFilter,
    peak: BiquadTDF2,
    high_cut: CutFilter,
}

impl ChannelChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install low-cut cascade coefficients
    pub fn configure_low_cut(&mut self, coeffs: &CutCoeffs, slope: FilterSlope) {
        self.low_cut.configure(coeffs, slope);
    }

    /// Install peak-band coefficients
    pub fn set_peak_coefficients(&mut self, coeffs: BiquadCoeffs) {
        self.peak.set_coeffs(coeffs);
    }

    /// Install high-cut cascade coefficients
    pub fn configure_high_cut(&mut self, coeffs: &CutCoeffs, slope: FilterSlope) {
        self.high_cut.configure(coeffs, slope);
    }

    /// Bypass the peak stage (pass-through, state frozen)
    pub fn set_peak_bypassed(&mut self, bypassed: bool) {
        self.peak.set_bypassed(bypassed);
    }

    pub fn low_cut(&self) -> &CutFilter {
        &self.low_cut
    }

    pub fn peak_coeffs(&self) -> &BiquadCoeffs {
        self.peak.coeffs()
    }

    pub fn high_cut(&self) -> &CutFilter {
        &self.high_cut
    }
}

impl Processor for ChannelChain {
    fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }
}

impl MonoProcessor for ChannelChain {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        let out = self.low_cut.process_sample(input);
        let out = self.peak.process_sample(out);
        self.high_cut.process_sample(out)
    }
}
