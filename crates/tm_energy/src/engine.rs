use log::info;

use crate::aggregator::{self, ThermoResult};
use crate::environment::Environment;
use crate::error::MeltingError;
use crate::methods::{self, Computation};
use crate::pipeline;
use crate::registry;
use crate::store::ParameterStore;

/// Predicts the melting temperature of the environment's duplex.
///
/// Selects the unique applicable method, runs it, sends nearest-neighbor
/// accumulations through the correction pipeline and derives the
/// temperature. Approximative methods skip the pipeline entirely.
pub fn melt(env: &Environment, store: &ParameterStore) -> Result<ThermoResult, MeltingError> {
    let method = registry::select(env)?;
    info!("selected method {} for {}", method.name, env.hybridization());

    let computation = methods::compute(method, env, store)?;
    let computation = match (method.table_name(), computation) {
        (Some(table_name), Computation::NearestNeighbor { dh, ds }) => {
            let (dh, ds) = pipeline::apply(dh, ds, env, store.get(table_name)?)?;
            Computation::NearestNeighbor { dh, ds }
        }
        (_, computation) => computation,
    };
    aggregator::finalize(computation, env, method.name)
}

/// [`melt`] with the built-in parameter tables.
pub fn melt_builtin(env: &Environment) -> Result<ThermoResult, MeltingError> {
    melt(env, ParameterStore::builtin())
}
