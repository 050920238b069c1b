use std::fmt;

use crate::{Base, GAP_CHAR, Hybridization, NucleicAcid, SequenceError, Strand};

/// One strand slot of an aligned duplex column; `None` marks a gap.
pub type Slot = Option<Base>;

/// Two aligned strands. The top strand reads 5' to 3', the bottom strand
/// is stored column-aligned underneath it and therefore reads 3' to 5'.
/// Gaps open terminal overhangs and are only legal in the first and last
/// column. Hairpin stems use the same layout, with the folded-back arm
/// as the bottom strand.
#[derive(Clone, Hash, Debug, Eq, PartialEq)]
pub struct Duplex {
    top: Vec<Slot>,
    bottom: Vec<Slot>,
    hybridization: Hybridization,
}

fn parse_aligned(s: &str, acid: NucleicAcid) -> Result<Vec<Slot>, SequenceError> {
    let mut vec = Vec::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if c == GAP_CHAR {
            vec.push(None);
            continue;
        }
        let base = Base::try_from(c)?;
        if !acid.admits(base) {
            return Err(SequenceError::AcidMismatch {
                base,
                acid,
                position: i,
            });
        }
        vec.push(Some(base));
    }
    Ok(vec)
}

impl Duplex {
    /// Builds a duplex from two aligned strand strings.
    pub fn from_strands(
        top: &str,
        bottom: &str,
        hybridization: Hybridization,
    ) -> Result<Self, SequenceError> {
        let top = parse_aligned(top, hybridization.top_acid())?;
        let bottom = parse_aligned(bottom, hybridization.bottom_acid())?;
        if top.is_empty() {
            return Err(SequenceError::Empty);
        }
        if top.len() != bottom.len() {
            return Err(SequenceError::LengthMismatch(top.len(), bottom.len()));
        }
        let last = top.len() - 1;
        for i in 0..top.len() {
            match (top[i], bottom[i]) {
                (None, None) => return Err(SequenceError::OpposingGaps(i)),
                (None, _) | (_, None) if i != 0 && i != last => {
                    return Err(SequenceError::InteriorGap(i));
                }
                _ => {}
            }
        }
        Ok(Duplex {
            top,
            bottom,
            hybridization,
        })
    }

    /// Builds a blunt, fully complementary duplex from the top strand alone.
    pub fn blunt(top: &str, hybridization: Hybridization) -> Result<Self, SequenceError> {
        let strand = Strand::try_from(top)?;
        strand.check_alphabet(hybridization.top_acid())?;
        let bottom_acid = hybridization.bottom_acid();
        let bottom = strand.iter().map(|b| Some(b.complement(bottom_acid))).collect();
        Ok(Duplex {
            top: strand.iter().map(|&b| Some(b)).collect(),
            bottom,
            hybridization,
        })
    }

    /// Folds a single strand back on itself. `loop_start..loop_end` marks
    /// the unpaired loop; everything outside the span forms the stem. The
    /// returned duplex holds the stem with the 5' arm on top, plus the
    /// loop length.
    pub fn fold_hairpin(
        sequence: &str,
        loop_start: usize,
        loop_end: usize,
    ) -> Result<(Self, usize), SequenceError> {
        let strand = Strand::try_from(sequence)?;
        strand.check_alphabet(NucleicAcid::Dna)?;
        let len = strand.len();
        if loop_start >= loop_end || loop_end > len {
            return Err(SequenceError::LoopSpan {
                start: loop_start,
                end: loop_end,
                len,
            });
        }
        let loop_len = loop_end - loop_start;
        if loop_len < 3 {
            return Err(SequenceError::LoopTooShort(loop_len));
        }
        let left = &strand[..loop_start];
        let right = &strand[loop_end..];
        if left.len() != right.len() {
            return Err(SequenceError::UnevenStem {
                left: left.len(),
                right: right.len(),
            });
        }
        if left.is_empty() {
            return Err(SequenceError::Empty);
        }
        for (i, &base) in left.iter().enumerate() {
            if !base.pairs_with(right[right.len() - 1 - i]) {
                return Err(SequenceError::UnpairedStem(i));
            }
        }
        let duplex = Duplex {
            top: left.iter().map(|&b| Some(b)).collect(),
            bottom: right.iter().rev().map(|&b| Some(b)).collect(),
            hybridization: Hybridization::Hairpin,
        };
        Ok((duplex, loop_len))
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    pub fn hybridization(&self) -> Hybridization {
        self.hybridization
    }

    pub fn top(&self) -> &[Slot] {
        &self.top
    }

    pub fn bottom(&self) -> &[Slot] {
        &self.bottom
    }

    pub fn column(&self, i: usize) -> (Slot, Slot) {
        (self.top[i], self.bottom[i])
    }

    pub fn columns(&self) -> impl Iterator<Item = (Slot, Slot)> + '_ {
        self.top.iter().copied().zip(self.bottom.iter().copied())
    }

    /// Both slots occupied and forming a Watson-Crick pair.
    pub fn is_column_paired(&self, i: usize) -> bool {
        match self.column(i) {
            (Some(t), Some(b)) => t.pairs_with(b),
            _ => false,
        }
    }

    /// First and last paired column, skipping overhangs and terminal
    /// mismatches. `None` if no column pairs at all.
    pub fn paired_span(&self) -> Option<(usize, usize)> {
        let first = (0..self.len()).find(|&i| self.is_column_paired(i))?;
        let last = (0..self.len()).rfind(|&i| self.is_column_paired(i))?;
        Some((first, last))
    }

    /// Top strand bases with gaps skipped, 5' to 3'.
    pub fn top_strand(&self) -> Strand {
        Strand(self.top.iter().filter_map(|&s| s).collect())
    }

    /// Bottom strand bases with gaps skipped, still 3' to 5'.
    pub fn bottom_strand(&self) -> Strand {
        Strand(self.bottom.iter().filter_map(|&s| s).collect())
    }

    /// A duplex of two identical strands: blunt, fully paired, and with a
    /// top strand equal to its own reverse complement.
    pub fn is_self_complementary(&self) -> bool {
        match self.hybridization {
            Hybridization::DnaDna | Hybridization::RnaRna => {}
            _ => return false,
        }
        if !(0..self.len()).all(|i| self.is_column_paired(i)) {
            return false;
        }
        self.top_strand().is_palindromic(self.hybridization.bottom_acid())
    }

    /// The same physical duplex written with the other strand on top.
    /// Hybrid duplexes keep the DNA strand on top and hairpins keep their
    /// 5' arm on top, so both are returned unchanged.
    pub fn rotated(&self) -> Duplex {
        match self.hybridization {
            Hybridization::DnaRna | Hybridization::Hairpin => self.clone(),
            _ => Duplex {
                top: self.bottom.iter().rev().copied().collect(),
                bottom: self.top.iter().rev().copied().collect(),
                hybridization: self.hybridization,
            },
        }
    }
}

fn write_slots(f: &mut fmt::Formatter<'_>, slots: &[Slot]) -> fmt::Result {
    for slot in slots {
        match slot {
            Some(base) => write!(f, "{}", base)?,
            None => write!(f, "{}", GAP_CHAR)?,
        }
    }
    Ok(())
}

impl fmt::Display for Duplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_slots(f, &self.top)?;
        write!(f, "/")?;
        write_slots(f, &self.bottom)
    }
}
