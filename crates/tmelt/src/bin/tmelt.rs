use std::io::Write;
use log::info;
use colored::*;
use env_logger::Builder;
use clap::Args;
use clap::Parser;
use clap::ArgAction;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use tm_energy::{melt, Environment, ParameterStore, ThermoResult};

use tmelt::environment_parsers::build_spec;
use tmelt::environment_parsers::ConditionArguments;
use tmelt::environment_parsers::CorrectionArguments;
use tmelt::environment_parsers::MethodArguments;
use tmelt::input_parsers::{read_melt_records_input, MeltRecord};
use tmelt::report::{human_report, json_report};

#[derive(Debug, Args)]
pub struct MeltInput {
    /// Sequence 5'->3' (reads --input when absent)
    #[arg(value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    /// Aligned complement 3'->5' for the sequence argument
    #[arg(long, value_name = "SEQUENCE")]
    pub complement: Option<String>,

    /// Input file with FASTA-like records, or "-" for stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<String>,

    /// Emit one JSON object per record instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Parser)]
#[command(name = "tmelt")]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub melt: MeltInput,

    #[command(flatten, next_help_heading = "Buffer conditions")]
    pub conditions: ConditionArguments,

    #[command(flatten, next_help_heading = "Method selection")]
    pub method: MethodArguments,

    #[command(flatten, next_help_heading = "Correction stages")]
    pub corrections: CorrectionArguments,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn collect_records(input: &MeltInput) -> Result<Vec<MeltRecord>> {
    match (&input.sequence, &input.input) {
        (Some(_), Some(_)) => bail!("give either a sequence argument or --input, not both"),
        (Some(sequence), None) => Ok(vec![MeltRecord {
            header: None,
            sequence: sequence.clone(),
            complement: input.complement.clone(),
        }]),
        (None, Some(path)) => {
            if input.complement.is_some() {
                bail!("--complement only applies to a sequence argument");
            }
            read_melt_records_input(path)
        }
        (None, None) => bail!("nothing to do; give a sequence argument or --input FILE"),
    }
}

fn process(
    record: &MeltRecord,
    conditions: &ConditionArguments,
    method: &MethodArguments,
    corrections: &CorrectionArguments,
    store: &ParameterStore,
) -> Result<ThermoResult> {
    let spec = build_spec(record, conditions, method, corrections)?;
    let env = Environment::new(&spec)?;
    Ok(melt(&env, store)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.melt.verbose);

    let records = collect_records(&cli.melt)?;
    info!("processing {} record(s)", records.len());

    let store = cli.method.build_store()?;
    let outcomes: Vec<Result<ThermoResult>> = records
        .par_iter()
        .enumerate()
        .map(|(idx, record)| {
            process(record, &cli.conditions, &cli.method, &cli.corrections, &store)
                .with_context(|| format!("record {} ({})", idx + 1, record.label()))
        })
        .collect();

    let mut failed = 0;
    for (record, outcome) in records.iter().zip(&outcomes) {
        match outcome {
            Ok(result) => {
                if cli.melt.json {
                    println!("{}", json_report(record, result)?);
                } else {
                    print!("{}", human_report(record, result));
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {e:#}", "ERROR:".red());
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} record(s) failed", records.len());
    }
    Ok(())
}
