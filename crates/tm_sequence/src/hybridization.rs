use std::fmt;
use std::str::FromStr;

use crate::{NucleicAcid, SequenceError};

/// The kind of duplex a melting experiment is run on. For hybrid duplexes
/// the DNA strand is always the top strand.
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Hybridization { DnaDna, DnaRna, RnaRna, Hairpin }

impl Hybridization {
    pub fn top_acid(&self) -> NucleicAcid {
        match self {
            Hybridization::RnaRna => NucleicAcid::Rna,
            _ => NucleicAcid::Dna,
        }
    }

    pub fn bottom_acid(&self) -> NucleicAcid {
        match self {
            Hybridization::DnaDna | Hybridization::Hairpin => NucleicAcid::Dna,
            Hybridization::DnaRna | Hybridization::RnaRna => NucleicAcid::Rna,
        }
    }

    pub fn is_hairpin(&self) -> bool {
        matches!(self, Hybridization::Hairpin)
    }

    /// Intramolecular foldings melt without a second strand.
    pub fn is_bimolecular(&self) -> bool {
        !self.is_hairpin()
    }
}

impl FromStr for Hybridization {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dnadna" => Ok(Hybridization::DnaDna),
            "dnarna" | "rnadna" => Ok(Hybridization::DnaRna),
            "rnarna" => Ok(Hybridization::RnaRna),
            "hairpin" => Ok(Hybridization::Hairpin),
            _ => Err(SequenceError::UnknownHybridization(s.to_string())),
        }
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Hybridization::DnaDna => "DNA/DNA",
            Hybridization::DnaRna => "DNA/RNA",
            Hybridization::RnaRna => "RNA/RNA",
            Hybridization::Hairpin => "hairpin",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hybridization_from_str() {
        assert_eq!("dnadna".parse(), Ok(Hybridization::DnaDna));
        assert_eq!("DnaRna".parse(), Ok(Hybridization::DnaRna));
        assert_eq!("rnadna".parse(), Ok(Hybridization::DnaRna));
        assert_eq!("RNARNA".parse(), Ok(Hybridization::RnaRna));
        assert_eq!("hairpin".parse(), Ok(Hybridization::Hairpin));
        assert_eq!(
            "dna".parse::<Hybridization>(),
            Err(SequenceError::UnknownHybridization("dna".to_string()))
        );
    }

    #[test]
    fn test_strand_backbones() {
        assert_eq!(Hybridization::DnaDna.top_acid(), NucleicAcid::Dna);
        assert_eq!(Hybridization::DnaDna.bottom_acid(), NucleicAcid::Dna);
        assert_eq!(Hybridization::DnaRna.top_acid(), NucleicAcid::Dna);
        assert_eq!(Hybridization::DnaRna.bottom_acid(), NucleicAcid::Rna);
        assert_eq!(Hybridization::RnaRna.top_acid(), NucleicAcid::Rna);
        assert_eq!(Hybridization::Hairpin.bottom_acid(), NucleicAcid::Dna);
    }

    #[test]
    fn test_molecularity() {
        assert!(Hybridization::DnaDna.is_bimolecular());
        assert!(!Hybridization::Hairpin.is_bimolecular());
        assert!(Hybridization::Hairpin.is_hairpin());
    }
}
