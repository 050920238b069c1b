use std::fmt;

use crate::SequenceError;

/// The character opening a terminal overhang in aligned duplex input.
pub const GAP_CHAR: char = '-';

#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Base { A, C, G, T, U }
pub const BCOUNT: usize = 5; // 5 Base variants, sizes the pairing table.

impl TryFrom<char> for Base {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            'U' => Ok(Base::U),
            _ => Err(SequenceError::InvalidChar(c)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
            Base::U => 'U',
        };
        write!(f, "{}", c)
    }
}

const PAIR_LOOKUP: [[bool; BCOUNT]; BCOUNT] = {
    use Base::*;
    let mut table = [[false; BCOUNT]; BCOUNT];
    table[A as usize][T as usize] = true;
    table[T as usize][A as usize] = true;
    table[A as usize][U as usize] = true;
    table[U as usize][A as usize] = true;
    table[C as usize][G as usize] = true;
    table[G as usize][C as usize] = true;
    table
};

impl Base {
    /// Watson-Crick partner on a strand of the given backbone.
    pub fn complement(&self, acid: NucleicAcid) -> Base {
        match (self, acid) {
            (Base::A, NucleicAcid::Dna) => Base::T,
            (Base::A, NucleicAcid::Rna) => Base::U,
            (Base::T, _) | (Base::U, _) => Base::A,
            (Base::C, _) => Base::G,
            (Base::G, _) => Base::C,
        }
    }

    pub fn pairs_with(&self, other: Base) -> bool {
        PAIR_LOOKUP[*self as usize][other as usize]
    }

    /// Strong (three hydrogen bonds) bases G and C.
    pub fn is_strong(&self) -> bool {
        matches!(self, Base::G | Base::C)
    }
}

#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum NucleicAcid { Dna, Rna }

impl NucleicAcid {
    /// Whether the base belongs to this backbone's alphabet.
    pub fn admits(&self, base: Base) -> bool {
        match self {
            NucleicAcid::Dna => base != Base::U,
            NucleicAcid::Rna => base != Base::T,
        }
    }
}

impl fmt::Display for NucleicAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NucleicAcid::Dna => "DNA",
            NucleicAcid::Rna => "RNA",
        };
        write!(f, "{}", s)
    }
}
