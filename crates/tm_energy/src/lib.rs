/// Error type of the whole engine.
mod error;

/// Dinucleotide windows and the motifs looked up in parameter tables.
mod motif;

/// Parameter file parsing & the in-memory table representation.
mod tables;

/// The built-in parameter tables and user table management.
mod store;

/// Validated computation requests: duplex, ions, flags.
mod environment;

/// Method descriptors and selection.
pub mod registry;

/// Approximative formulas and nearest-neighbor accumulation.
mod methods;

/// The ordered correction stages.
pub mod pipeline;

/// Melting temperature derivation and unit conversion.
mod aggregator;

/// Ties selection, computation, corrections and aggregation together.
mod engine;

pub use aggregator::*;
pub use engine::*;
pub use environment::*;
pub use error::*;
pub use methods::*;
pub use motif::*;
pub use store::*;
pub use tables::*;
