use std::fmt;

use crate::{Base, NucleicAcid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A character that is neither a nucleotide nor a gap.
    InvalidChar(char),
    /// A gap character in a context that only accepts plain strands.
    UnexpectedGap(usize),
    /// The empty string is not a sequence.
    Empty,
    /// A base that does not belong to the declared alphabet.
    AcidMismatch {
        base: Base,
        acid: NucleicAcid,
        position: usize,
    },
    /// Two strands of a duplex with different aligned lengths.
    LengthMismatch(usize, usize),
    /// A gap anywhere but the first or last column of a duplex.
    InteriorGap(usize),
    /// A column where both strands carry a gap.
    OpposingGaps(usize),
    /// A hybridization name outside the supported set.
    UnknownHybridization(String),
    /// A hairpin loop span that does not fit the sequence.
    LoopSpan {
        start: usize,
        end: usize,
        len: usize,
    },
    /// A hairpin loop shorter than the minimal three unpaired bases.
    LoopTooShort(usize),
    /// Hairpin stem arms of different lengths.
    UnevenStem { left: usize, right: usize },
    /// A stem column whose bases do not form a Watson-Crick pair.
    UnpairedStem(usize),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidChar(c) => {
                write!(f, "Invalid character in sequence input: '{c}'")
            }
            SequenceError::UnexpectedGap(i) => {
                write!(f, "Gap character '-' at position {i} in a plain strand")
            }
            SequenceError::Empty => {
                write!(f, "Empty sequence input")
            }
            SequenceError::AcidMismatch {
                base,
                acid,
                position,
            } => {
                write!(f, "Base {base} at position {position} is not part of a {acid} strand")
            }
            SequenceError::LengthMismatch(a, b) => {
                write!(f, "Aligned strands differ in length: {a} vs {b}")
            }
            SequenceError::InteriorGap(i) => {
                write!(f, "Gap at interior position {i}; gaps may only open a terminal overhang")
            }
            SequenceError::OpposingGaps(i) => {
                write!(f, "Both strands carry a gap at position {i}")
            }
            SequenceError::UnknownHybridization(s) => {
                write!(f, "Unknown hybridization '{s}'; expected dnadna, dnarna, rnarna or hairpin")
            }
            SequenceError::LoopSpan { start, end, len } => {
                write!(f, "Loop span {start}..{end} does not fit a sequence of length {len}")
            }
            SequenceError::LoopTooShort(n) => {
                write!(f, "Hairpin loop of {n} bases; at least 3 unpaired bases are required")
            }
            SequenceError::UnevenStem { left, right } => {
                write!(f, "Hairpin stem arms differ in length: {left} vs {right}")
            }
            SequenceError::UnpairedStem(i) => {
                write!(f, "Hairpin stem column {i} is not a Watson-Crick pair")
            }
        }
    }
}

impl std::error::Error for SequenceError {}
