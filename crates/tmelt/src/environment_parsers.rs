use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use tm_energy::{EnvironmentSpec, ParameterStore};
use tm_sequence::Hybridization;

use crate::input_parsers::MeltRecord;

/// Buffer composition and strand concentration.
#[derive(Debug, Args)]
pub struct ConditionArguments {
    /// Sodium concentration in mol/L
    #[arg(long, default_value = "0.05", value_name = "MOLAR")]
    pub sodium: f64,

    /// Potassium concentration in mol/L
    #[arg(long, default_value = "0.0", value_name = "MOLAR")]
    pub potassium: f64,

    /// Magnesium concentration in mol/L
    #[arg(long, default_value = "0.0", value_name = "MOLAR")]
    pub magnesium: f64,

    /// Tris buffer concentration in mol/L
    #[arg(long, default_value = "0.0", value_name = "MOLAR")]
    pub tris: f64,

    /// Total strand concentration in mol/L
    #[arg(short = 'c', long, default_value = "5e-7", value_name = "MOLAR")]
    pub strand_concentration: f64,
}

/// Method and parameter table selection.
#[derive(Debug, Args)]
pub struct MethodArguments {
    /// Duplex kind: dnadna, dnarna, rnadna, rnarna or hairpin
    #[arg(short = 'H', long, default_value = "dnadna", value_name = "KIND")]
    pub hybridization: Hybridization,

    /// Computation method (defaults to the registry pick for the duplex kind)
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Additional parameter file(s) loaded over the builtin set
    #[arg(short, long, value_name = "FILE")]
    pub parameter_file: Vec<PathBuf>,

    /// Hairpin loop span as START..END over the input sequence
    #[arg(long, value_name = "SPAN")]
    pub loop_span: Option<String>,

    /// Override the palindrome check (true or false)
    #[arg(long, value_name = "BOOL")]
    pub self_complementary: Option<bool>,
}

impl MethodArguments {
    /// Builtin tables plus any user-supplied parameter files.
    pub fn build_store(&self) -> Result<ParameterStore> {
        let mut store = ParameterStore::builtin().clone();
        for path in &self.parameter_file {
            let name = store
                .load_file(path)
                .with_context(|| format!("loading parameter file {}", path.display()))?;
            debug!("loaded parameter table '{name}' from {}", path.display());
        }
        Ok(store)
    }

    pub fn loop_span(&self) -> Result<Option<(usize, usize)>> {
        self.loop_span.as_deref().map(parse_loop_span).transpose()
    }
}

/// Correction stages applied after the nearest-neighbor walk.
#[derive(Debug, Args)]
pub struct CorrectionArguments {
    /// Skip the salt correction
    #[arg(long)]
    pub skip_salt: bool,

    /// Skip terminal mismatch and dangling end corrections
    #[arg(long)]
    pub skip_terminal: bool,

    /// Skip the hairpin loop correction
    #[arg(long)]
    pub skip_loop: bool,
}

fn parse_loop_span(text: &str) -> Result<(usize, usize)> {
    let (start, end) = text
        .split_once("..")
        .with_context(|| format!("loop span '{text}' is not of the form START..END"))?;
    let start = start
        .trim()
        .parse()
        .with_context(|| format!("loop span start '{start}' is not a position"))?;
    let end = end
        .trim()
        .parse()
        .with_context(|| format!("loop span end '{end}' is not a position"))?;
    Ok((start, end))
}

/// Assembles the environment request for one record. Validation happens
/// in [`tm_energy::Environment::new`].
pub fn build_spec(
    record: &MeltRecord,
    conditions: &ConditionArguments,
    method: &MethodArguments,
    corrections: &CorrectionArguments,
) -> Result<EnvironmentSpec> {
    Ok(EnvironmentSpec {
        sequence: record.sequence.clone(),
        complement: record.complement.clone(),
        hybridization: method.hybridization,
        sodium: conditions.sodium,
        potassium: conditions.potassium,
        magnesium: conditions.magnesium,
        tris: conditions.tris,
        strand_concentration: conditions.strand_concentration,
        model: method.model.clone(),
        skip_salt: corrections.skip_salt,
        skip_terminal: corrections.skip_terminal,
        skip_loop: corrections.skip_loop,
        self_complementary: method.self_complementary,
        loop_span: method.loop_span()?,
    })
}
