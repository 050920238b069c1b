use tm_sequence::{Duplex, Hybridization};

use crate::error::MeltingError;

/// Sodium equivalence factor for divalent magnesium, von Ahsen et al.
/// (2001), Clinical Chemistry 47: 1956-1961, in molar units.
const MAGNESIUM_FACTOR: f64 = 3.795;

/// Caller-facing description of one melting experiment. Plain data; all
/// validation happens in [`Environment::new`].
#[derive(Clone, Debug)]
pub struct EnvironmentSpec {
    /// Top strand, 5' to 3'. May carry terminal `-` gaps when an explicit
    /// complement is given.
    pub sequence: String,
    /// Aligned complement, 3' to 5'. Derived by exact complementarity when
    /// absent.
    pub complement: Option<String>,
    pub hybridization: Hybridization,
    /// Ion concentrations, molar.
    pub sodium: f64,
    pub potassium: f64,
    pub magnesium: f64,
    pub tris: f64,
    /// Total strand concentration, molar. Ignored for hairpins.
    pub strand_concentration: f64,
    /// Explicit method name; `None` selects the hybridization's default.
    pub model: Option<String>,
    pub skip_salt: bool,
    pub skip_terminal: bool,
    pub skip_loop: bool,
    /// Overrides the computed self-complementarity when set.
    pub self_complementary: Option<bool>,
    /// Hairpin loop span `start..end` over the input sequence.
    pub loop_span: Option<(usize, usize)>,
}

impl Default for EnvironmentSpec {
    fn default() -> Self {
        EnvironmentSpec {
            sequence: String::new(),
            complement: None,
            hybridization: Hybridization::DnaDna,
            sodium: 0.0,
            potassium: 0.0,
            magnesium: 0.0,
            tris: 0.0,
            strand_concentration: 0.0,
            model: None,
            skip_salt: false,
            skip_terminal: false,
            skip_loop: false,
            self_complementary: None,
            loop_span: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IonConditions {
    pub sodium: f64,
    pub potassium: f64,
    pub magnesium: f64,
    pub tris: f64,
}

impl IonConditions {
    /// Monovalent sodium equivalent of the full ion set:
    /// `[Na+] + [K+] + [Tris]/2 + 3.795·sqrt([Mg2+])`.
    pub fn sodium_equivalent(&self) -> f64 {
        self.sodium + self.potassium + self.tris / 2.0 + MAGNESIUM_FACTOR * self.magnesium.sqrt()
    }

    fn validate(&self) -> Result<(), MeltingError> {
        for c in [self.sodium, self.potassium, self.magnesium, self.tris] {
            if !c.is_finite() || c < 0.0 {
                return Err(MeltingError::InvalidConcentration(c));
            }
        }
        Ok(())
    }
}

/// Which correction stages run. All on by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corrections {
    pub salt: bool,
    pub terminal: bool,
    pub loops: bool,
}

impl Default for Corrections {
    fn default() -> Self {
        Corrections {
            salt: true,
            terminal: true,
            loops: true,
        }
    }
}

/// A validated melting experiment, immutable after construction.
#[derive(Clone, Debug)]
pub struct Environment {
    duplex: Duplex,
    loop_len: Option<usize>,
    ions: IonConditions,
    strand_concentration: f64,
    model: Option<String>,
    corrections: Corrections,
    self_complementary: bool,
}

impl Environment {
    pub fn new(spec: &EnvironmentSpec) -> Result<Self, MeltingError> {
        let ions = IonConditions {
            sodium: spec.sodium,
            potassium: spec.potassium,
            magnesium: spec.magnesium,
            tris: spec.tris,
        };
        ions.validate()?;

        let hybridization = spec.hybridization;
        if hybridization.is_bimolecular()
            && (!spec.strand_concentration.is_finite() || spec.strand_concentration <= 0.0)
        {
            return Err(MeltingError::InvalidConcentration(spec.strand_concentration));
        }

        let (duplex, loop_len) = if hybridization.is_hairpin() {
            if spec.complement.is_some() {
                return Err(MeltingError::InvalidEnvironment(
                    "a hairpin folds on itself and takes no complement strand".to_string(),
                ));
            }
            let Some((start, end)) = spec.loop_span else {
                return Err(MeltingError::InvalidEnvironment(
                    "a hairpin needs a declared loop span".to_string(),
                ));
            };
            let (stem, loop_len) = Duplex::fold_hairpin(&spec.sequence, start, end)?;
            (stem, Some(loop_len))
        } else {
            if spec.loop_span.is_some() {
                return Err(MeltingError::InvalidEnvironment(
                    "a loop span only applies to hairpins".to_string(),
                ));
            }
            let duplex = match &spec.complement {
                Some(complement) => {
                    Duplex::from_strands(&spec.sequence, complement, hybridization)?
                }
                None => Duplex::blunt(&spec.sequence, hybridization)?,
            };
            (duplex, None)
        };

        let self_complementary = match spec.self_complementary {
            Some(_) if hybridization.is_hairpin() => {
                return Err(MeltingError::InvalidEnvironment(
                    "self-complementarity does not apply to hairpins".to_string(),
                ));
            }
            Some(flag) => flag,
            None => duplex.is_self_complementary(),
        };

        Ok(Environment {
            duplex,
            loop_len,
            ions,
            strand_concentration: spec.strand_concentration,
            model: spec.model.clone(),
            corrections: Corrections {
                salt: !spec.skip_salt,
                terminal: !spec.skip_terminal,
                loops: !spec.skip_loop,
            },
            self_complementary,
        })
    }

    pub fn duplex(&self) -> &Duplex {
        &self.duplex
    }

    pub fn hybridization(&self) -> Hybridization {
        self.duplex.hybridization()
    }

    /// Declared hairpin loop length; `None` for bimolecular input.
    pub fn loop_len(&self) -> Option<usize> {
        self.loop_len
    }

    pub fn ions(&self) -> IonConditions {
        self.ions
    }

    pub fn sodium_equivalent(&self) -> f64 {
        self.ions.sodium_equivalent()
    }

    pub fn strand_concentration(&self) -> f64 {
        self.strand_concentration
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn corrections(&self) -> Corrections {
        self.corrections
    }

    pub fn is_self_complementary(&self) -> bool {
        self.self_complementary
    }

    /// Phosphate-counting length: full strand length for hairpins,
    /// alignment length otherwise.
    pub fn nucleotide_len(&self) -> usize {
        match self.loop_len {
            Some(loop_len) => 2 * self.duplex.len() + loop_len,
            None => self.duplex.len(),
        }
    }
}
