use std::fmt;

use tm_sequence::{Duplex, GAP_CHAR, Slot};

/// A two-column window of an aligned duplex. `top` reads 5' to 3', `bottom`
/// sits underneath and reads 3' to 5', like the duplex it was cut from.
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Step {
    pub top: (Slot, Slot),
    pub bottom: (Slot, Slot),
}

fn slot_paired(top: Slot, bottom: Slot) -> bool {
    match (top, bottom) {
        (Some(t), Some(b)) => t.pairs_with(b),
        _ => false,
    }
}

impl Step {
    pub fn new(top: (Slot, Slot), bottom: (Slot, Slot)) -> Self {
        Step { top, bottom }
    }

    /// The window starting at column `i` of a duplex.
    pub fn at(duplex: &Duplex, i: usize) -> Self {
        Step {
            top: (duplex.top()[i], duplex.top()[i + 1]),
            bottom: (duplex.bottom()[i], duplex.bottom()[i + 1]),
        }
    }

    pub fn left_paired(&self) -> bool {
        slot_paired(self.top.0, self.bottom.0)
    }

    pub fn right_paired(&self) -> bool {
        slot_paired(self.top.1, self.bottom.1)
    }

    pub fn has_gap(&self) -> bool {
        self.top.0.is_none()
            || self.top.1.is_none()
            || self.bottom.0.is_none()
            || self.bottom.1.is_none()
    }

    /// The window as seen after turning the duplex around by 180 degrees:
    /// strands swap and both read in the other direction.
    pub fn rotated(&self) -> Step {
        Step {
            top: (self.bottom.1, self.bottom.0),
            bottom: (self.top.1, self.top.0),
        }
    }

    /// The lexicographically smaller of the window and its rotation. Both
    /// writings of a physical motif share one canonical form.
    pub fn canonical(&self) -> Step {
        (*self).min(self.rotated())
    }
}

fn write_slot(f: &mut fmt::Formatter<'_>, slot: Slot) -> fmt::Result {
    match slot {
        Some(base) => write!(f, "{}", base),
        None => write!(f, "{}", GAP_CHAR),
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_slot(f, self.top.0)?;
        write_slot(f, self.top.1)?;
        write!(f, "/")?;
        write_slot(f, self.bottom.0)?;
        write_slot(f, self.bottom.1)
    }
}

/// A table key. Step-carrying variants keep the same window type apart so a
/// stack, an interior mismatch, a terminal mismatch and a dangling end can
/// never shadow each other.
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Motif {
    /// Duplex formation offset.
    Init,
    /// Per-terminal initiation for an A·T or A·U closing pair.
    InitTerminalAt,
    /// Per-terminal initiation for a G·C closing pair.
    InitTerminalGc,
    /// Self-complementary correction.
    Symmetry,
    /// Two adjacent Watson-Crick pairs.
    Stack(Step),
    /// A window with an unpaired column between paired neighbors.
    InternalMismatch(Step),
    /// A window with an unpaired column at a duplex end.
    TerminalMismatch(Step),
    /// A window with a terminal overhang column.
    Dangling(Step),
    /// Hairpin loop penalty, keyed by loop length.
    HairpinLoop(usize),
}

impl Motif {
    /// Canonical key for lookups and storage. Rotation is a physical
    /// symmetry only when both strands share a backbone; asymmetric (hybrid)
    /// tables keep windows exactly as written.
    pub fn normalized(&self, symmetric: bool) -> Motif {
        if !symmetric {
            return *self;
        }
        match self {
            Motif::Stack(s) => Motif::Stack(s.canonical()),
            Motif::InternalMismatch(s) => Motif::InternalMismatch(s.canonical()),
            Motif::TerminalMismatch(s) => Motif::TerminalMismatch(s.canonical()),
            Motif::Dangling(s) => Motif::Dangling(s.canonical()),
            _ => *self,
        }
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motif::Init => write!(f, "init"),
            Motif::InitTerminalAt => write!(f, "init_A/T"),
            Motif::InitTerminalGc => write!(f, "init_G/C"),
            Motif::Symmetry => write!(f, "sym"),
            Motif::Stack(s) => write!(f, "stack {s}"),
            Motif::InternalMismatch(s) => write!(f, "mismatch {s}"),
            Motif::TerminalMismatch(s) => write!(f, "terminal mismatch {s}"),
            Motif::Dangling(s) => write!(f, "dangling end {s}"),
            Motif::HairpinLoop(n) => write!(f, "loop of {n}"),
        }
    }
}
