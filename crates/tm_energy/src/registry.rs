use tm_sequence::Hybridization;
use tm_sequence::Hybridization::{DnaDna, DnaRna, Hairpin, RnaRna};

use crate::environment::Environment;
use crate::error::MeltingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Approximative,
    NearestNeighbor,
}

/// One registered computation method. Selection is data-driven: the
/// registry owns the routing rules, the methods only compute.
#[derive(Clone, Copy, Debug)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub kind: MethodKind,
    /// Hybridizations the method accepts at all.
    pub hybridizations: &'static [Hybridization],
    /// Hybridizations the method answers for when no model is named.
    pub default_for: &'static [Hybridization],
    /// Shortest aligned duplex the method is defined on.
    pub min_len: usize,
}

impl MethodDescriptor {
    /// Pure applicability predicate over a validated environment.
    pub fn applies(&self, env: &Environment) -> bool {
        if !self.hybridizations.contains(&env.hybridization()) {
            return false;
        }
        if env.duplex().len() < self.min_len {
            return false;
        }
        match env.model() {
            Some(name) => name == self.name,
            None => self.default_for.contains(&env.hybridization()),
        }
    }

    /// Nearest-neighbor methods read the parameter table of their name.
    pub fn table_name(&self) -> Option<&'static str> {
        match self.kind {
            MethodKind::NearestNeighbor => Some(self.name),
            MethodKind::Approximative => None,
        }
    }
}

/// The closed method set. Exactly one descriptor answers any valid
/// environment: per hybridization one default, and explicit names are
/// unique.
pub static METHODS: &[MethodDescriptor] = &[
    MethodDescriptor {
        name: "all97",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[DnaDna, Hairpin],
        default_for: &[DnaDna, Hairpin],
        min_len: 2,
    },
    MethodDescriptor {
        name: "san04",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[DnaDna, Hairpin],
        default_for: &[],
        min_len: 2,
    },
    MethodDescriptor {
        name: "bre86",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[DnaDna],
        default_for: &[],
        min_len: 2,
    },
    MethodDescriptor {
        name: "sug96",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[DnaDna],
        default_for: &[],
        min_len: 2,
    },
    MethodDescriptor {
        name: "sug95",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[DnaRna],
        default_for: &[DnaRna],
        min_len: 2,
    },
    MethodDescriptor {
        name: "xia98",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[RnaRna],
        default_for: &[RnaRna],
        min_len: 2,
    },
    MethodDescriptor {
        name: "fre86",
        kind: MethodKind::NearestNeighbor,
        hybridizations: &[RnaRna],
        default_for: &[],
        min_len: 2,
    },
    MethodDescriptor {
        name: "wallace",
        kind: MethodKind::Approximative,
        hybridizations: &[DnaDna],
        default_for: &[],
        min_len: 1,
    },
    MethodDescriptor {
        name: "che93",
        kind: MethodKind::Approximative,
        hybridizations: &[DnaDna],
        default_for: &[],
        min_len: 1,
    },
    MethodDescriptor {
        name: "schdot",
        kind: MethodKind::Approximative,
        hybridizations: &[DnaDna],
        default_for: &[],
        min_len: 1,
    },
];

/// Selects the unique applicable method from the registry.
pub fn select(env: &Environment) -> Result<&'static MethodDescriptor, MeltingError> {
    if env.model().is_none() && env.duplex().len() < 2 {
        return Err(MeltingError::InvalidEnvironment(
            "a single base pair has no default method; name one explicitly".to_string(),
        ));
    }
    select_from(METHODS, env)
}

/// Selection over an explicit descriptor list, for custom registries and
/// direct testing of the matching rules.
pub fn select_from<'a>(
    methods: &'a [MethodDescriptor],
    env: &Environment,
) -> Result<&'a MethodDescriptor, MeltingError> {
    let mut matches = methods.iter().filter(|m| m.applies(env));
    let Some(first) = matches.next() else {
        return Err(MeltingError::NoApplicableMethod {
            model: env.model().map(String::from),
            hybridization: env.hybridization(),
        });
    };
    let extra: Vec<&'static str> = matches.map(|m| m.name).collect();
    if !extra.is_empty() {
        let mut names = vec![first.name];
        names.extend(extra);
        return Err(MeltingError::AmbiguousMethod { matches: names });
    }
    Ok(first)
}
