use serde::Serialize;

use crate::environment::Environment;
use crate::error::MeltingError;
use crate::methods::Computation;

/// 0 degrees Celsius in Kelvin.
pub const K0: f64 = 273.15;
/// Molar gas constant in cal/(mol K).
pub const GAS_CONSTANT: f64 = 1.9872;
/// Thermochemical calorie in Joule.
pub const CAL_TO_J: f64 = 4.184;

/// A finished melting temperature prediction.
///
/// Approximative methods produce a temperature directly and carry no
/// energies; nearest-neighbor methods report the corrected enthalpy
/// (cal/mol) and entropy (cal/(mol K)) the temperature was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThermoResult {
    Approximative {
        tm_celsius: f64,
        method: &'static str,
    },
    NearestNeighbor {
        enthalpy: f64,
        entropy: f64,
        tm_celsius: f64,
        method: &'static str,
    },
}

impl ThermoResult {
    pub fn tm_celsius(&self) -> f64 {
        match self {
            Self::Approximative { tm_celsius, .. } => *tm_celsius,
            Self::NearestNeighbor { tm_celsius, .. } => *tm_celsius,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::Approximative { method, .. } => method,
            Self::NearestNeighbor { method, .. } => method,
        }
    }

    pub fn is_approximative(&self) -> bool {
        matches!(self, Self::Approximative { .. })
    }

    pub fn enthalpy_cal(&self) -> Option<f64> {
        match self {
            Self::NearestNeighbor { enthalpy, .. } => Some(*enthalpy),
            Self::Approximative { .. } => None,
        }
    }

    pub fn entropy_cal(&self) -> Option<f64> {
        match self {
            Self::NearestNeighbor { entropy, .. } => Some(*entropy),
            Self::Approximative { .. } => None,
        }
    }

    pub fn enthalpy_joule(&self) -> Option<f64> {
        self.enthalpy_cal().map(|v| v * CAL_TO_J)
    }

    pub fn entropy_joule(&self) -> Option<f64> {
        self.entropy_cal().map(|v| v * CAL_TO_J)
    }
}

/// Turns a computation into a result.
///
/// Bimolecular duplexes melt at `Tm = dH / (dS + R ln(Ct/x))` with x = 4
/// for self-complementary duplexes and x = 1 otherwise; hairpins fold
/// back on themselves and melt at `Tm = dH / dS` with no concentration
/// term. Temperatures are reported in degrees Celsius.
pub fn finalize(
    computation: Computation,
    env: &Environment,
    method: &'static str,
) -> Result<ThermoResult, MeltingError> {
    match computation {
        Computation::Approximative { tm_celsius } => {
            Ok(ThermoResult::Approximative { tm_celsius, method })
        }
        Computation::NearestNeighbor { dh, ds } => {
            let tm_kelvin = if env.hybridization().is_bimolecular() {
                let ct = env.strand_concentration();
                if !ct.is_finite() || ct <= 0.0 {
                    return Err(MeltingError::InvalidConcentration(ct));
                }
                let x = if env.is_self_complementary() { 4.0 } else { 1.0 };
                let denominator = ds + GAS_CONSTANT * (ct / x).ln();
                if !denominator.is_finite() || denominator == 0.0 {
                    return Err(MeltingError::DivisionByZero);
                }
                dh / denominator
            } else {
                if !ds.is_finite() || ds == 0.0 {
                    return Err(MeltingError::DivisionByZero);
                }
                dh / ds
            };
            if !tm_kelvin.is_finite() {
                return Err(MeltingError::DivisionByZero);
            }
            Ok(ThermoResult::NearestNeighbor {
                enthalpy: dh,
                entropy: ds,
                tm_celsius: tm_kelvin - K0,
                method,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentSpec;
    use approx::assert_relative_eq;
    use tm_sequence::Hybridization;

    fn duplex_env(sequence: &str) -> Environment {
        let spec = EnvironmentSpec {
            sequence: sequence.to_string(),
            sodium: 0.1,
            strand_concentration: 1e-6,
            ..EnvironmentSpec::default()
        };
        Environment::new(&spec).unwrap()
    }

    fn hairpin_env() -> Environment {
        let spec = EnvironmentSpec {
            sequence: "GCGAAAACGC".to_string(),
            hybridization: Hybridization::Hairpin,
            loop_span: Some((3, 7)),
            sodium: 0.1,
            ..EnvironmentSpec::default()
        };
        Environment::new(&spec).unwrap()
    }

    #[test]
    fn test_approximative_passes_through() {
        let env = duplex_env("AGCG");
        let result =
            finalize(Computation::Approximative { tm_celsius: 37.0 }, &env, "wallace").unwrap();
        assert_eq!(result.tm_celsius(), 37.0);
        assert_eq!(result.method(), "wallace");
        assert!(result.is_approximative());
        assert_eq!(result.enthalpy_cal(), None);
        assert_eq!(result.enthalpy_joule(), None);
        assert_eq!(result.entropy_joule(), None);
    }

    #[test]
    fn test_bimolecular_concentration_term() {
        let env = duplex_env("AGCG");
        let computation = Computation::NearestNeighbor { dh: -10000.0, ds: -30.0 };
        let result = finalize(computation, &env, "all97").unwrap();
        let expected = -10000.0 / (-30.0 + GAS_CONSTANT * 1e-6_f64.ln()) - K0;
        assert_relative_eq!(result.tm_celsius(), expected, epsilon = 1e-12);
        assert_eq!(result.enthalpy_cal(), Some(-10000.0));
        assert_eq!(result.entropy_cal(), Some(-30.0));
        assert!(!result.is_approximative());
    }

    #[test]
    fn test_self_complementary_quarters_the_concentration() {
        let env = duplex_env("GAATTC");
        let computation = Computation::NearestNeighbor { dh: -10000.0, ds: -30.0 };
        let result = finalize(computation, &env, "all97").unwrap();
        let expected = -10000.0 / (-30.0 + GAS_CONSTANT * (1e-6_f64 / 4.0).ln()) - K0;
        assert_relative_eq!(result.tm_celsius(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_hairpin_needs_no_concentration() {
        let computation = Computation::NearestNeighbor { dh: -20400.0, ds: -62.9 };
        let result = finalize(computation, &hairpin_env(), "all97").unwrap();
        assert_relative_eq!(result.tm_celsius(), -20400.0 / -62.9 - K0, epsilon = 1e-12);
    }

    #[test]
    fn test_vanishing_denominator() {
        let ds = -(GAS_CONSTANT * 1e-6_f64.ln());
        let computation = Computation::NearestNeighbor { dh: -10000.0, ds };
        let err = finalize(computation, &duplex_env("AGCG"), "all97").unwrap_err();
        assert!(matches!(err, MeltingError::DivisionByZero));

        let computation = Computation::NearestNeighbor { dh: -10000.0, ds: 0.0 };
        let err = finalize(computation, &hairpin_env(), "all97").unwrap_err();
        assert!(matches!(err, MeltingError::DivisionByZero));
    }

    #[test]
    fn test_non_finite_entropy() {
        let computation = Computation::NearestNeighbor { dh: -10000.0, ds: f64::NAN };
        let err = finalize(computation, &hairpin_env(), "all97").unwrap_err();
        assert!(matches!(err, MeltingError::DivisionByZero));
    }

    #[test]
    fn test_calorie_joule_round_trip() {
        let env = duplex_env("AGCG");
        let computation = Computation::NearestNeighbor { dh: -25800.0, ds: -71.3 };
        let result = finalize(computation, &env, "all97").unwrap();
        let joule = result.enthalpy_joule().unwrap();
        assert_relative_eq!(joule / CAL_TO_J, result.enthalpy_cal().unwrap(), epsilon = 1e-9);
        let joule = result.entropy_joule().unwrap();
        assert_relative_eq!(joule / CAL_TO_J, result.entropy_cal().unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_serialized_form_is_tagged() {
        let env = duplex_env("AGCG");
        let computation = Computation::NearestNeighbor { dh: -25800.0, ds: -71.3 };
        let result = finalize(computation, &env, "all97").unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "nearest_neighbor");
        assert_eq!(value["method"], "all97");
        assert_eq!(value["enthalpy"], -25800.0);

        let value =
            serde_json::to_value(ThermoResult::Approximative { tm_celsius: 12.0, method: "wallace" })
                .unwrap();
        assert_eq!(value["kind"], "approximative");
        assert!(value.get("enthalpy").is_none());
    }
}
