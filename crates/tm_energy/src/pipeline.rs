use log::{debug, info};

use crate::environment::Environment;
use crate::error::MeltingError;
use crate::motif::{Motif, Step};
use crate::tables::ParameterTable;

/// A correction applied to accumulated enthalpy and entropy.
pub type Stage = fn(f64, f64, &Environment, &ParameterTable) -> Result<(f64, f64), MeltingError>;

/// Correction stages in application order: duplex initiation terms first,
/// deferred terminal features next, the hairpin loop penalty after, and
/// the ionic entropy adjustment last, once the entropy is fully assembled.
pub static STAGES: &[(&str, Stage)] = &[
    ("initiation", initiation),
    ("terminal", terminal),
    ("loop", hairpin_loop),
    ("salt", salt),
];

/// Folds the accumulated energies through every stage in order.
pub fn apply(
    dh: f64,
    ds: f64,
    env: &Environment,
    table: &ParameterTable,
) -> Result<(f64, f64), MeltingError> {
    let (mut dh, mut ds) = (dh, ds);
    for (name, stage) in STAGES {
        (dh, ds) = stage(dh, ds, env, table)?;
        info!("after {name}: dH {dh:+.1} cal/mol, dS {ds:+.3} cal/(mol K)");
    }
    Ok((dh, ds))
}

/// Adds the table's helix initiation terms: `init` for every structure,
/// plus one terminal increment per end of the paired span and the
/// symmetry entry for self-complementary duplexes. Hairpins close on a
/// loop instead of a second end and take `init` alone.
fn initiation(
    dh: f64,
    ds: f64,
    env: &Environment,
    table: &ParameterTable,
) -> Result<(f64, f64), MeltingError> {
    const STAGE: &str = "initiation correction";
    let (mut dh, mut ds) = (dh, ds);

    let init = table.require(Motif::Init, STAGE)?;
    dh += init.dh;
    ds += init.ds;
    if env.hybridization().is_hairpin() {
        return Ok((dh, ds));
    }

    let duplex = env.duplex();
    let Some((first, last)) = duplex.paired_span() else {
        return Err(MeltingError::InvalidEnvironment(
            "the aligned strands share no base pair".to_string(),
        ));
    };
    // A single paired column is both the 5' and the 3' terminal.
    for col in [first, last] {
        let motif = match duplex.column(col).0 {
            Some(base) if base.is_strong() => Motif::InitTerminalGc,
            Some(_) => Motif::InitTerminalAt,
            None => continue,
        };
        let pair = table.require(motif, STAGE)?;
        dh += pair.dh;
        ds += pair.ds;
    }

    if env.is_self_complementary() {
        let sym = table.require(Motif::Symmetry, STAGE)?;
        dh += sym.dh;
        ds += sym.ds;
    }
    Ok((dh, ds))
}

/// Looks up the windows the nearest-neighbor walk left out: everything
/// between the duplex ends and the paired span. A window with a gap is a
/// dangling end, a window without one is a terminal mismatch.
fn terminal(
    dh: f64,
    ds: f64,
    env: &Environment,
    table: &ParameterTable,
) -> Result<(f64, f64), MeltingError> {
    const STAGE: &str = "terminal correction";
    if !env.corrections().terminal {
        return Ok((dh, ds));
    }
    let duplex = env.duplex();
    let Some((first, last)) = duplex.paired_span() else {
        return Ok((dh, ds));
    };

    let (mut dh, mut ds) = (dh, ds);
    for i in (0..first).chain(last..duplex.len() - 1) {
        let step = Step::at(duplex, i);
        let motif = if step.has_gap() {
            Motif::Dangling(step)
        } else {
            Motif::TerminalMismatch(step)
        };
        let pair = table.require(motif, STAGE)?;
        debug!("terminal window {i}: {motif} dH {:+.0} dS {:+.2}", pair.dh, pair.ds);
        dh += pair.dh;
        ds += pair.ds;
    }
    Ok((dh, ds))
}

/// Adds the loop penalty for the declared hairpin loop length. No-op for
/// bimolecular input, which carries no loop.
fn hairpin_loop(
    dh: f64,
    ds: f64,
    env: &Environment,
    table: &ParameterTable,
) -> Result<(f64, f64), MeltingError> {
    if !env.corrections().loops {
        return Ok((dh, ds));
    }
    let Some(loop_len) = env.loop_len() else {
        return Ok((dh, ds));
    };
    let pair = table.require(Motif::HairpinLoop(loop_len), "loop correction")?;
    Ok((dh + pair.dh, ds + pair.ds))
}

/// Entropy-only ionic strength correction over the full nucleotide count.
fn salt(
    dh: f64,
    ds: f64,
    env: &Environment,
    table: &ParameterTable,
) -> Result<(f64, f64), MeltingError> {
    if !env.corrections().salt {
        return Ok((dh, ds));
    }
    let na_eq = env.sodium_equivalent();
    // An ion free buffer skips the correction rather than evaluating ln(0).
    if na_eq == 0.0 {
        return Ok((dh, ds));
    }
    let n = env.nucleotide_len() as f64;
    Ok((dh, ds + table.salt_coefficient() * (n - 1.0) * na_eq.ln()))
}
