//! EQ parameters: slopes, snapshot, and the lock-free store
//!
//! The store is the boundary with the host/UI layer. Writers clamp through
//! the declared ranges before the value ever reaches an atomic cell, so the
//! DSP side can treat every loaded value as in-range by contract.

use serde::{Deserialize, Serialize};

use teq_core::{AtomicChoice, AtomicParam, EqError, EqResult, ParamRange};

/// Cut-filter slope in dB per octave
///
/// Each step adds one 2nd-order Butterworth section to the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterSlope {
    #[default]
    Db12,
    Db24,
    Db36,
    Db48,
}

impl FilterSlope {
    /// Number of active biquad stages for this slope
    pub fn stages(self) -> usize {
        match self {
            FilterSlope::Db12 => 1,
            FilterSlope::Db24 => 2,
            FilterSlope::Db36 => 3,
            FilterSlope::Db48 => 4,
        }
    }

    /// Section Q values for a cascaded Butterworth response
    ///
    /// Factoring of the order-`2 * stages` Butterworth polynomial into
    /// 2nd-order sections; the overall response is maximally flat.
    pub fn butterworth_qs(self) -> &'static [f64] {
        match self {
            FilterSlope::Db12 => &[std::f64::consts::FRAC_1_SQRT_2],
            FilterSlope::Db24 => &[0.5411961001461969, 1.3065629648763764],
            FilterSlope::Db36 => &[
                0.5176380902050415,
                std::f64::consts::FRAC_1_SQRT_2,
                1.9318516525781366,
            ],
            FilterSlope::Db48 => &[
                0.5097956518498039,
                0.6013448869350453,
                0.8999762231364156,
                2.5629154477415055,
            ],
        }
    }

    /// Slope from a host choice-parameter index
    ///
    /// An index outside 0..=3 cannot map to a defined stage count and is a
    /// fatal configuration error.
    pub fn from_index(index: usize) -> EqResult<Self> {
        match index {
            0 => Ok(FilterSlope::Db12),
            1 => Ok(FilterSlope::Db24),
            2 => Ok(FilterSlope::Db36),
            3 => Ok(FilterSlope::Db48),
            _ => Err(EqError::InvalidSlope(index)),
        }
    }

    /// Choice-parameter index of this slope
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Immutable parameter snapshot, captured once per update cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainSettings {
    pub peak_freq: f64,
    pub peak_gain_db: f64,
    pub peak_q: f64,
    pub low_cut_freq: f64,
    pub high_cut_freq: f64,
    pub low_cut_slope: FilterSlope,
    pub high_cut_slope: FilterSlope,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            peak_freq: EqParams::PEAK_FREQ.default,
            peak_gain_db: EqParams::PEAK_GAIN.default,
            peak_q: EqParams::PEAK_Q.default,
            low_cut_freq: EqParams::LOW_CUT_FREQ.default,
            high_cut_freq: EqParams::HIGH_CUT_FREQ.default,
            low_cut_slope: FilterSlope::Db12,
            high_cut_slope: FilterSlope::Db12,
        }
    }
}

/// Lock-free parameter store
///
/// One atomic cell per parameter. The control thread writes through the
/// clamping setters; the audio thread only ever calls [`EqParams::snapshot`].
/// The snapshot is not atomic as a whole: parameters edited while a block
/// boundary is crossed may tear, which the next block corrects.
pub struct EqParams {
    peak_freq: AtomicParam,
    peak_gain_db: AtomicParam,
    peak_q: AtomicParam,
    low_cut_freq: AtomicParam,
    high_cut_freq: AtomicParam,
    low_cut_slope: AtomicChoice,
    high_cut_slope: AtomicChoice,
}

impl EqParams {
    pub const PEAK_FREQ: ParamRange = ParamRange::logarithmic(20.0, 20000.0, 750.0);
    pub const PEAK_GAIN: ParamRange = ParamRange::linear(-24.0, 24.0, 0.0);
    pub const PEAK_Q: ParamRange = ParamRange::linear(0.1, 10.0, 1.0);
    pub const LOW_CUT_FREQ: ParamRange = ParamRange::logarithmic(20.0, 20000.0, 20.0);
    pub const HIGH_CUT_FREQ: ParamRange = ParamRange::logarithmic(20.0, 20000.0, 20000.0);

    pub fn new() -> Self {
        Self {
            peak_freq: AtomicParam::new(Self::PEAK_FREQ.default),
            peak_gain_db: AtomicParam::new(Self::PEAK_GAIN.default),
            peak_q: AtomicParam::new(Self::PEAK_Q.default),
            low_cut_freq: AtomicParam::new(Self::LOW_CUT_FREQ.default),
            high_cut_freq: AtomicParam::new(Self::HIGH_CUT_FREQ.default),
            low_cut_slope: AtomicChoice::new(FilterSlope::Db12.index() as u32),
            high_cut_slope: AtomicChoice::new(FilterSlope::Db12.index() as u32),
        }
    }

    pub fn set_peak_freq(&self, freq: f64) {
        self.peak_freq.set(Self::PEAK_FREQ.clamp(freq));
    }

    pub fn set_peak_gain_db(&self, gain_db: f64) {
        self.peak_gain_db.set(Self::PEAK_GAIN.clamp(gain_db));
    }

    pub fn set_peak_q(&self, q: f64) {
        self.peak_q.set(Self::PEAK_Q.clamp(q));
    }

    pub fn set_low_cut_freq(&self, freq: f64) {
        self.low_cut_freq.set(Self::LOW_CUT_FREQ.clamp(freq));
    }

    pub fn set_high_cut_freq(&self, freq: f64) {
        self.high_cut_freq.set(Self::HIGH_CUT_FREQ.clamp(freq));
    }

    pub fn set_low_cut_slope(&self, slope: FilterSlope) {
        self.low_cut_slope.set(slope.index() as u32);
    }

    pub fn set_high_cut_slope(&self, slope: FilterSlope) {
        self.high_cut_slope.set(slope.index() as u32);
    }

    /// Set the low-cut slope from a host choice index
    pub fn set_low_cut_slope_index(&self, index: usize) -> EqResult<()> {
        self.set_low_cut_slope(FilterSlope::from_index(index)?);
        Ok(())
    }

    /// Set the high-cut slope from a host choice index
    pub fn set_high_cut_slope_index(&self, index: usize) -> EqResult<()> {
        self.set_high_cut_slope(FilterSlope::from_index(index)?);
        Ok(())
    }

    /// Apply a whole snapshot (host state restore)
    pub fn apply(&self, settings: &ChainSettings) {
        self.set_peak_freq(settings.peak_freq);
        self.set_peak_gain_db(settings.peak_gain_db);
        self.set_peak_q(settings.peak_q);
        self.set_low_cut_freq(settings.low_cut_freq);
        self.set_high_cut_freq(settings.high_cut_freq);
        self.set_low_cut_slope(settings.low_cut_slope);
        self.set_high_cut_slope(settings.high_cut_slope);
    }

    /// Capture the current parameter values
    ///
    /// One relaxed load per parameter; wait-free, no allocation.
    pub fn snapshot(&self) -> ChainSettings {
        // Stored indices are validated on the write side; an out-of-range
        // value is unreachable through the public API.
        let low_cut_slope =
            FilterSlope::from_index(self.low_cut_slope.get() as usize).unwrap_or_default();
        let high_cut_slope =
            FilterSlope::from_index(self.high_cut_slope.get() as usize).unwrap_or_default();

        ChainSettings {
            peak_freq: self.peak_freq.get(),
            peak_gain_db: self.peak_gain_db.get(),
            peak_q: self.peak_q.get(),
            low_cut_freq: self.low_cut_freq.get(),
            high_cut_freq: self.high_cut_freq.get(),
            low_cut_slope,
            high_cut_slope,
        }
    }
}

impl Default for EqParams {
    fn default() -> Self {
        Self::new()
    }
}
