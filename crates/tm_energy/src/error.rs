use std::fmt;

use tm_sequence::{Hybridization, SequenceError};

use crate::motif::Motif;
use crate::tables::ParamError;

#[derive(Debug)]
pub enum MeltingError {
    /// The environment fails a structural or chemical precondition.
    InvalidEnvironment(String),
    /// No registered method matches the environment.
    NoApplicableMethod {
        model: Option<String>,
        hybridization: Hybridization,
    },
    /// More than one registered method matches the same environment.
    AmbiguousMethod { matches: Vec<&'static str> },
    /// The selected table has no entry for a motif the duplex requires.
    UnknownMotif { motif: Motif, stage: &'static str },
    /// A concentration outside its valid range.
    InvalidConcentration(f64),
    /// The melting temperature denominator vanishes or is not finite.
    DivisionByZero,
    /// A parameter table name with no loaded table behind it.
    UnknownTable(String),
    Sequence(SequenceError),
    Param(ParamError),
}

impl fmt::Display for MeltingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeltingError::InvalidEnvironment(msg) => {
                write!(f, "Invalid environment: {msg}")
            }
            MeltingError::NoApplicableMethod {
                model,
                hybridization,
            } => match model {
                Some(name) => {
                    write!(f, "No method named '{name}' applies to {hybridization} input")
                }
                None => write!(f, "No default method applies to {hybridization} input"),
            },
            MeltingError::AmbiguousMethod { matches } => {
                write!(f, "Ambiguous method selection: {}", matches.join(", "))
            }
            MeltingError::UnknownMotif { motif, stage } => {
                write!(f, "No parameter entry for {motif} ({stage})")
            }
            MeltingError::InvalidConcentration(c) => {
                write!(f, "Invalid concentration: {c} M")
            }
            MeltingError::DivisionByZero => {
                write!(f, "Melting temperature denominator vanishes")
            }
            MeltingError::UnknownTable(name) => {
                write!(f, "No parameter table named '{name}' is loaded")
            }
            MeltingError::Sequence(e) => write!(f, "{e}"),
            MeltingError::Param(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MeltingError {}

impl From<SequenceError> for MeltingError {
    fn from(e: SequenceError) -> Self {
        MeltingError::Sequence(e)
    }
}

impl From<ParamError> for MeltingError {
    fn from(e: ParamError) -> Self {
        MeltingError::Param(e)
    }
}
