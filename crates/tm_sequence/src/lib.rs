mod error;
mod base;
mod strand;
mod hybridization;
mod duplex;

pub use error::*;
pub use base::*;
pub use strand::*;
pub use hybridization::*;
pub use duplex::*;
