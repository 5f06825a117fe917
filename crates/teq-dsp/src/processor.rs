//! Stereo EQ processor
//!
//! Owns the two channel chains and the handle to the shared parameter
//! store. Once per block it snapshots the parameters, designs coefficients
//! for all three bands, installs the same coefficient values into both
//! chains, then processes each channel independently. Update-then-process
//! is synchronous on the audio thread, never mid-block, so left and right
//! see identical coefficients for the whole block.

use std::sync::Arc;

use log::{debug, warn};

use teq_core::{EqError, EqResult, Sample};

use crate::chain::ChannelChain;
use crate::design::{high_cut_coefficients, low_cut_coefficients, peak_coefficients};
use crate::params::EqParams;
use crate::{MonoProcessor, Processor, ProcessorConfig, StereoProcessor};

/// Three-band stereo EQ: low cut -> peak -> high cut, per channel
pub struct StereoEq {
    params: Arc<EqParams>,
    left: ChannelChain,
    right: ChannelChain,
    sample_rate: f64,
    max_block_size: usize,
}

impl StereoEq {
    /// An unprepared processor; the host must call [`StereoEq::prepare`]
    /// before the first block.
    pub fn new(params: Arc<EqParams>) -> Self {
        Self {
            params,
            left: ChannelChain::new(),
            right: ChannelChain::new(),
            sample_rate: 0.0,
            max_block_size: 0,
        }
    }

    /// Shared handle to the parameter store
    pub fn params(&self) -> &Arc<EqParams> {
        &self.params
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Establish the stream format and a silent initial state
    ///
    /// Called by the host before streaming and on any format change, never
    /// during active processing. Clears all recursive filter memory and
    /// installs coefficients for the current parameter values.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> EqResult<()> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(EqError::InvalidSampleRate(sample_rate));
        }
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.left.reset();
        self.right.reset();
        self.update_filters();
        debug!("prepared: sample_rate={sample_rate}, max_block_size={max_block_size}");
        Ok(())
    }

    /// Snapshot the parameters and hot-swap coefficients into both chains
    ///
    /// The audio thread is both producer and consumer here: coefficients are
    /// computed from freshly loaded parameter scalars and installed by plain
    /// struct assignment between blocks. Identical values go to both chains,
    /// guaranteeing left/right tonal symmetry. Stack-only; no allocation.
    pub fn update_filters(&mut self) {
        let settings = self.params.snapshot();

        let peak = peak_coefficients(
            settings.peak_freq,
            settings.peak_q,
            settings.peak_gain_db,
            self.sample_rate,
        );
        let low_cut =
            low_cut_coefficients(settings.low_cut_freq, settings.low_cut_slope, self.sample_rate);
        let high_cut = high_cut_coefficients(
            settings.high_cut_freq,
            settings.high_cut_slope,
            self.sample_rate,
        );

        self.left.configure_low_cut(&low_cut, settings.low_cut_slope);
        self.left.set_peak_coefficients(peak);
        self.left.configure_high_cut(&high_cut, settings.high_cut_slope);

        self.right.configure_low_cut(&low_cut, settings.low_cut_slope);
        self.right.set_peak_coefficients(peak);
        self.right.configure_high_cut(&high_cut, settings.high_cut_slope);
    }
}

impl Processor for StereoEq {
    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}

impl StereoProcessor for StereoEq {
    /// Process one sample pair with the coefficients installed at the last
    /// block boundary. Parameter pickup happens in `process_block`.
    #[inline]
    fn process_sample(&mut self, left: Sample, right: Sample) -> (Sample, Sample) {
        (
            self.left.process_sample(left),
            self.right.process_sample(right),
        )
    }

    fn process_block(&mut self, left: &mut [Sample], right: &mut [Sample]) {
        debug_assert_eq!(left.len(), right.len());
        debug_assert!(self.sample_rate > 0.0, "process_block before prepare");
        debug_assert!(left.len() <= self.max_block_size);

        self.update_filters();
        self.left.process_block(left);
        self.right.process_block(right);
    }
}

impl ProcessorConfig for StereoEq {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        if let Err(err) = self.prepare(sample_rate, self.max_block_size) {
            warn!("ignoring sample-rate change: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FilterSlope;

    const SR: f64 = 48000.0;
    const BLOCK: usize = 512;

    fn prepared_eq(params: Arc<EqParams>) -> StereoEq {
        let mut eq = StereoEq::new(params);
        eq.prepare(SR, BLOCK).unwrap();
        eq
    }

    fn tone(freq: f64, len: usize) -> Vec<Sample> {
        (0..len)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / SR).sin())
            .collect()
    }

    #[test]
    fn test_prepare_rejects_bad_sample_rate() {
        let mut eq = StereoEq::new(Arc::new(EqParams::new()));
        assert!(matches!(
            eq.prepare(0.0, BLOCK),
            Err(EqError::InvalidSampleRate(_))
        ));
        assert!(eq.prepare(f64::NAN, BLOCK).is_err());
        assert!(eq.prepare(-48000.0, BLOCK).is_err());
    }

    #[test]
    fn test_stereo_symmetry() {
        let params = Arc::new(EqParams::new());
        params.set_peak_gain_db(6.0);
        params.set_low_cut_freq(80.0);
        params.set_low_cut_slope(FilterSlope::Db36);
        let mut eq = prepared_eq(params);

        let mut left = tone(440.0, BLOCK);
        let mut right = left.clone();
        eq.process_block(&mut left, &mut right);

        // Identical inputs, identical coefficients: bit-identical outputs.
        assert_eq!(left, right);
    }

    #[test]
    fn test_update_filters_is_idempotent() {
        let params = Arc::new(EqParams::new());
        params.set_peak_freq(1234.0);
        params.set_peak_gain_db(-3.5);
        params.set_high_cut_slope(FilterSlope::Db48);
        let mut eq = prepared_eq(params);

        eq.update_filters();
        let peak_first = *eq.left.peak_coeffs();
        let cut_first = *eq.left.high_cut().stage_coeffs(0);

        eq.update_filters();
        assert_eq!(*eq.left.peak_coeffs(), peak_first);
        assert_eq!(*eq.left.high_cut().stage_coeffs(0), cut_first);
    }

    #[test]
    fn test_both_chains_get_identical_coefficients() {
        let params = Arc::new(EqParams::new());
        params.set_peak_gain_db(4.0);
        params.set_low_cut_freq(200.0);
        params.set_low_cut_slope(FilterSlope::Db24);
        let eq = prepared_eq(params);

        assert_eq!(eq.left.peak_coeffs(), eq.right.peak_coeffs());
        for i in 0..2 {
            assert_eq!(
                eq.left.low_cut().stage_coeffs(i),
                eq.right.low_cut().stage_coeffs(i)
            );
        }
    }

    #[test]
    fn test_prepare_clears_residual_state() {
        let params = Arc::new(EqParams::new());
        params.set_peak_gain_db(9.0);
        params.set_low_cut_freq(150.0);
        let mut eq = prepared_eq(params);

        let mut impulse_l = vec![0.0; BLOCK];
        let mut impulse_r = vec![0.0; BLOCK];
        impulse_l[0] = 1.0;
        impulse_r[0] = 1.0;
        eq.process_block(&mut impulse_l, &mut impulse_r);
        let first_ever = impulse_l[0];

        // Pollute the filter memory, then re-prepare.
        let mut noise_l = tone(333.0, BLOCK);
        let mut noise_r = tone(333.0, BLOCK);
        eq.process_block(&mut noise_l, &mut noise_r);
        eq.prepare(SR, BLOCK).unwrap();

        let mut again_l = vec![0.0; BLOCK];
        let mut again_r = vec![0.0; BLOCK];
        again_l[0] = 1.0;
        again_r[0] = 1.0;
        eq.process_block(&mut again_l, &mut again_r);

        assert_eq!(again_l[0], first_ever);
    }

    #[test]
    fn test_parameter_edits_land_at_next_block() {
        let params = Arc::new(EqParams::new());
        let mut eq = prepared_eq(Arc::clone(&params));

        let input = tone(750.0, BLOCK);

        // Flat settings: interior tone passes essentially unchanged.
        let mut flat_l = input.clone();
        let mut flat_r = input.clone();
        eq.process_block(&mut flat_l, &mut flat_r);

        // Control thread boosts the peak band between blocks.
        params.set_peak_gain_db(12.0);

        let mut boosted_l = input.clone();
        let mut boosted_r = input.clone();
        eq.process_block(&mut boosted_l, &mut boosted_r);

        let rms = |buf: &[Sample]| {
            (buf.iter().map(|x| x * x).sum::<f64>() / buf.len() as f64).sqrt()
        };
        assert!(rms(&boosted_l) > 2.0 * rms(&flat_l));
    }

    #[test]
    fn test_unchanged_params_give_stable_coefficients_across_blocks() {
        let params = Arc::new(EqParams::new());
        params.set_peak_freq(900.0);
        params.set_peak_gain_db(5.0);
        let mut eq = prepared_eq(params);

        let coeffs_before = *eq.left.peak_coeffs();
        let mut l = tone(500.0, BLOCK);
        let mut r = tone(500.0, BLOCK);
        for _ in 0..8 {
            eq.process_block(&mut l, &mut r);
        }
        assert_eq!(*eq.left.peak_coeffs(), coeffs_before);
    }
}
