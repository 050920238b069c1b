use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::{Base, GAP_CHAR, NucleicAcid, SequenceError};

/// A plain 5' to 3' strand without gaps.
#[derive(Clone, Hash, Debug, Eq, PartialEq)]
pub struct Strand(pub Vec<Base>);

impl Deref for Strand {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<[Base]> for Strand {
    fn borrow(&self) -> &[Base] {
        &self.0
    }
}

impl TryFrom<&str> for Strand {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.is_empty() {
            return Err(SequenceError::Empty);
        }
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            if c == GAP_CHAR {
                return Err(SequenceError::UnexpectedGap(i));
            }
            vec.push(Base::try_from(c)?);
        }
        Ok(Strand(vec))
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

impl Strand {
    /// Rejects bases outside the given backbone's alphabet.
    pub fn check_alphabet(&self, acid: NucleicAcid) -> Result<(), SequenceError> {
        for (i, &base) in self.0.iter().enumerate() {
            if !acid.admits(base) {
                return Err(SequenceError::AcidMismatch {
                    base,
                    acid,
                    position: i,
                });
            }
        }
        Ok(())
    }

    /// Fraction of G and C bases, in [0, 1].
    pub fn gc_fraction(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let gc = self.0.iter().filter(|b| b.is_strong()).count();
        gc as f64 / self.0.len() as f64
    }

    /// Base-wise complement, keeping orientation. The result reads 3' to 5'
    /// when aligned under this strand.
    pub fn complement(&self, acid: NucleicAcid) -> Strand {
        Strand(self.0.iter().map(|b| b.complement(acid)).collect())
    }

    /// Complement read 5' to 3', on a strand of the given backbone.
    pub fn reverse_complement(&self, acid: NucleicAcid) -> Strand {
        Strand(self.0.iter().rev().map(|b| b.complement(acid)).collect())
    }

    /// A strand equal to its own reverse complement hybridizes with itself.
    pub fn is_palindromic(&self, acid: NucleicAcid) -> bool {
        *self == self.reverse_complement(acid)
    }
}
