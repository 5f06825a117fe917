//! Lock-free parameter cells and range metadata
//!
//! The control thread writes parameter values at arbitrary times; the audio
//! thread reads them once per block. Each cell is an independent atomic
//! scalar, so a multi-parameter snapshot may tear across a block boundary.
//! That approximation is bounded and self-correcting by the next block.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Atomic float parameter for lock-free access
///
/// Stores the f64 bit pattern in an `AtomicU64`. Relaxed ordering is
/// sufficient: each cell is independent and carries no cross-cell invariant.
pub struct AtomicParam {
    bits: AtomicU64,
}

impl AtomicParam {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Atomic choice parameter (enum-indexed, e.g. filter slope)
pub struct AtomicChoice {
    index: AtomicU32,
}

impl AtomicChoice {
    pub fn new(index: u32) -> Self {
        Self {
            index: AtomicU32::new(index),
        }
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.index.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, index: u32) {
        self.index.store(index, Ordering::Relaxed);
    }
}

impl Default for AtomicChoice {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Parameter range specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub skew: ParamSkew,
}

impl ParamRange {
    pub const fn linear(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Linear,
        }
    }

    pub const fn logarithmic(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Logarithmic,
        }
    }

    /// Clamp a value into the range (write-side validation)
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Denormalize a 0-1 value to actual value
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let t = normalized.clamp(0.0, 1.0);
        match self.skew {
            ParamSkew::Linear => self.min + t * (self.max - self.min),
            ParamSkew::Logarithmic => {
                let log_min = self.min.ln();
                let log_max = self.max.ln();
                (log_min + t * (log_max - log_min)).exp()
            }
        }
    }

    /// Normalize an actual value to 0-1
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        match self.skew {
            ParamSkew::Linear => (clamped - self.min) / (self.max - self.min),
            ParamSkew::Logarithmic => {
                let log_min = self.min.ln();
                let log_max = self.max.ln();
                (clamped.ln() - log_min) / (log_max - log_min)
            }
        }
    }
}

/// Parameter skew type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamSkew {
    Linear,
    Logarithmic,
}
