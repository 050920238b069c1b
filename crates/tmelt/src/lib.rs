//! # tmelt
//!
//! Unified API for predicting nucleic acid melting temperatures.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod environment_parsers;
pub mod report;

pub mod sequence {
    pub use ::tm_sequence::*;
}

pub mod energy {
    pub use ::tm_energy::*;
}
