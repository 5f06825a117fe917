//! teq-core: Shared types for the Trellis EQ engine
//!
//! Foundational types used by the DSP core and any host wrapper:
//! the sample type, lock-free parameter cells, and the error type.

mod sample;
mod params;
mod error;

pub use sample::*;
pub use params::*;
pub use error::*;
