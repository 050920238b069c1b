use colored::Colorize;
use log::{debug, warn};

use crate::environment::Environment;
use crate::error::MeltingError;
use crate::motif::{Motif, Step};
use crate::registry::{MethodDescriptor, MethodKind};
use crate::store::ParameterStore;
use crate::tables::ParameterTable;

/// Longest duplex the tabulated parameters are calibrated for.
pub const CALIBRATION_LIMIT: usize = 60;

/// Raw method output, before any correction or temperature derivation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Computation {
    /// A directly computed temperature in degrees Celsius.
    Approximative { tm_celsius: f64 },
    /// Accumulated enthalpy (cal/mol) and entropy (cal/(mol·K)).
    NearestNeighbor { dh: f64, ds: f64 },
}

/// Runs the selected method against the environment.
pub fn compute(
    method: &MethodDescriptor,
    env: &Environment,
    store: &ParameterStore,
) -> Result<Computation, MeltingError> {
    match method.kind {
        MethodKind::Approximative => approximative(method.name, env),
        MethodKind::NearestNeighbor => {
            let table = store.get(method.name)?;
            nearest_neighbor(env, table)
        }
    }
}

fn approximative(name: &str, env: &Environment) -> Result<Computation, MeltingError> {
    let strand = env.duplex().top_strand();
    let n = strand.len() as f64;
    let gc_percent = strand.gc_fraction() * 100.0;

    let tm_celsius = match name {
        // Wallace et al. (1979): 2 degrees per A/T, 4 degrees per G/C.
        "wallace" => {
            let strong = strand.iter().filter(|b| b.is_strong()).count() as f64;
            2.0 * (n - strong) + 4.0 * strong
        }
        // Chester & Marshak (1993).
        "che93" => 69.3 + 0.41 * gc_percent - 650.0 / n,
        // Schildkraut & Lifson salt dependence on the Marmur-Doty rule.
        "schdot" => {
            let na_eq = env.sodium_equivalent();
            if na_eq <= 0.0 {
                return Err(MeltingError::InvalidConcentration(na_eq));
            }
            81.5 + 16.6 * na_eq.log10() + 0.41 * gc_percent - 600.0 / n
        }
        _ => {
            return Err(MeltingError::NoApplicableMethod {
                model: Some(name.to_string()),
                hybridization: env.hybridization(),
            });
        }
    };
    Ok(Computation::Approximative { tm_celsius })
}

/// Walks the duplex 5' to 3' one dinucleotide window at a time and sums
/// tabulated enthalpy and entropy. Windows inside the paired span are
/// stacks or interior mismatches; windows reaching past it hold terminal
/// features (overhangs, terminal mismatches) and are left to the terminal
/// correction stage.
fn nearest_neighbor(
    env: &Environment,
    table: &ParameterTable,
) -> Result<Computation, MeltingError> {
    let duplex = env.duplex();
    if duplex.len() > CALIBRATION_LIMIT {
        warn!(
            "{} {} nt is past the nearest-neighbor calibration range ({} nt)",
            "WARNING:".red(),
            duplex.len(),
            CALIBRATION_LIMIT
        );
    }

    let Some((first, last)) = duplex.paired_span() else {
        return Err(MeltingError::InvalidEnvironment(
            "the aligned strands share no base pair".to_string(),
        ));
    };

    let mut dh = 0.0;
    let mut ds = 0.0;
    for i in first..last {
        let step = Step::at(duplex, i);
        let motif = if step.left_paired() && step.right_paired() {
            Motif::Stack(step)
        } else {
            Motif::InternalMismatch(step)
        };
        let pair = table.require(motif, "nearest-neighbor accumulation")?;
        debug!("window {i}: {motif} dH {:+.0} dS {:+.2}", pair.dh, pair.ds);
        dh += pair.dh;
        ds += pair.ds;
    }
    Ok(Computation::NearestNeighbor { dh, ds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentSpec;
    use crate::registry;
    use approx::assert_relative_eq;
    use tm_sequence::Hybridization;

    fn env(sequence: &str, model: &str) -> Environment {
        let spec = EnvironmentSpec {
            sequence: sequence.to_string(),
            sodium: 0.1,
            strand_concentration: 1e-6,
            model: Some(model.to_string()),
            ..EnvironmentSpec::default()
        };
        Environment::new(&spec).unwrap()
    }

    fn run(environment: &Environment) -> Result<Computation, MeltingError> {
        let method = registry::select(environment)?;
        compute(method, environment, ParameterStore::builtin())
    }

    #[test]
    fn test_wallace_rule() {
        let Computation::Approximative { tm_celsius } = run(&env("GTCA", "wallace")).unwrap()
        else {
            panic!("expected a direct temperature")
        };
        assert_relative_eq!(tm_celsius, 12.0);

        let Computation::Approximative { tm_celsius } = run(&env("A", "wallace")).unwrap() else {
            panic!("expected a direct temperature")
        };
        assert_relative_eq!(tm_celsius, 2.0);
    }

    #[test]
    fn test_chester_marshak() {
        let Computation::Approximative { tm_celsius } = run(&env("GTCA", "che93")).unwrap() else {
            panic!("expected a direct temperature")
        };
        assert_relative_eq!(tm_celsius, 69.3 + 0.41 * 50.0 - 650.0 / 4.0);
    }

    #[test]
    fn test_salt_aware_marmur_doty() {
        let Computation::Approximative { tm_celsius } = run(&env("GTCA", "schdot")).unwrap()
        else {
            panic!("expected a direct temperature")
        };
        assert_relative_eq!(tm_celsius, 81.5 - 16.6 + 0.41 * 50.0 - 600.0 / 4.0, epsilon = 1e-9);

        // No monovalent or divalent cations at all.
        let spec = EnvironmentSpec {
            sequence: "GTCA".to_string(),
            strand_concentration: 1e-6,
            model: Some("schdot".to_string()),
            ..EnvironmentSpec::default()
        };
        let environment = Environment::new(&spec).unwrap();
        assert!(matches!(
            run(&environment),
            Err(MeltingError::InvalidConcentration(_))
        ));
    }

    #[test]
    fn test_stack_accumulation() {
        let Computation::NearestNeighbor { dh, ds } = run(&env("AGCG", "all97")).unwrap() else {
            panic!("expected accumulated energies")
        };
        // AG/TC + GC/CG + CG/GC from the unified table.
        assert_eq!(dh, -7800.0 - 9800.0 - 10600.0);
        assert_relative_eq!(ds, -21.0 - 24.4 - 27.2, epsilon = 1e-9);
    }

    #[test]
    fn test_terminal_windows_are_deferred() {
        let spec = EnvironmentSpec {
            sequence: "AGCT-".to_string(),
            complement: Some("TCGAA".to_string()),
            sodium: 0.1,
            strand_concentration: 1e-6,
            model: Some("all97".to_string()),
            ..EnvironmentSpec::default()
        };
        let dangling = Environment::new(&spec).unwrap();
        let blunt = env("AGCT", "all97");
        assert_eq!(run(&dangling).unwrap(), run(&blunt).unwrap());
    }

    #[test]
    fn test_interior_mismatch_accumulation() {
        let spec = EnvironmentSpec {
            sequence: "CAT".to_string(),
            complement: Some("GAA".to_string()),
            sodium: 0.1,
            strand_concentration: 1e-6,
            model: Some("all97".to_string()),
            ..EnvironmentSpec::default()
        };
        let environment = Environment::new(&spec).unwrap();
        let Computation::NearestNeighbor { dh, ds } = run(&environment).unwrap() else {
            panic!("expected accumulated energies")
        };
        // CA/GA plus AT/AA, the latter tabulated as its rotation AA/TA.
        assert_relative_eq!(dh, -900.0 + 1200.0, epsilon = 1e-9);
        assert_relative_eq!(ds, -4.2 + 1.7, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_motif_is_a_defined_failure() {
        let spec = EnvironmentSpec {
            sequence: "CAT".to_string(),
            complement: Some("GAA".to_string()),
            sodium: 0.1,
            strand_concentration: 1e-6,
            model: Some("bre86".to_string()),
            ..EnvironmentSpec::default()
        };
        let environment = Environment::new(&spec).unwrap();
        let err = run(&environment).unwrap_err();
        assert!(matches!(
            err,
            MeltingError::UnknownMotif { stage: "nearest-neighbor accumulation", .. }
        ));
    }

    #[test]
    fn test_hairpin_stem_accumulation() {
        let spec = EnvironmentSpec {
            sequence: "GCGAAAACGC".to_string(),
            hybridization: Hybridization::Hairpin,
            loop_span: Some((3, 7)),
            sodium: 0.1,
            ..EnvironmentSpec::default()
        };
        let environment = Environment::new(&spec).unwrap();
        let method = registry::select(&environment).unwrap();
        let Computation::NearestNeighbor { dh, ds } =
            compute(method, &environment, ParameterStore::builtin()).unwrap()
        else {
            panic!("expected accumulated energies")
        };
        // Stem GCG/CGC: GC/CG + CG/GC.
        assert_relative_eq!(dh, -9800.0 - 10600.0, epsilon = 1e-9);
        assert_relative_eq!(ds, -24.4 - 27.2, epsilon = 1e-9);
    }
}
