use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tm_energy::ThermoResult;

use crate::input_parsers::MeltRecord;

/// Machine-readable view of one finished record. The prediction fields
/// are flattened next to the record fields.
#[derive(Debug, Serialize)]
pub struct RecordReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<&'a str>,
    pub sequence: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<&'a str>,
    #[serde(flatten)]
    pub result: ThermoResult,
}

/// One compact JSON object per record, suitable for line-wise streams.
pub fn json_report(record: &MeltRecord, result: &ThermoResult) -> Result<String> {
    let report = RecordReport {
        header: record.header.as_deref(),
        sequence: &record.sequence,
        complement: record.complement.as_deref(),
        result: *result,
    };
    Ok(serde_json::to_string(&report)?)
}

/// Terminal report for one record. Energies appear in both calorie and
/// Joule units; approximative methods print the temperature alone.
pub fn human_report(record: &MeltRecord, result: &ThermoResult) -> String {
    let mut out = String::new();
    if let Some(header) = &record.header {
        out.push_str(&format!("{}\n", header.yellow()));
    }
    out.push_str(&format!("{}\n", record.sequence));
    if let Some(complement) = &record.complement {
        out.push_str(&format!("{complement}\n"));
    }
    if let (Some(cal), Some(joule)) = (result.enthalpy_cal(), result.enthalpy_joule()) {
        out.push_str(&format!("dH {cal:>12.1} cal/mol      {joule:>12.1} J/mol\n"));
    }
    if let (Some(cal), Some(joule)) = (result.entropy_cal(), result.entropy_joule()) {
        out.push_str(&format!("dS {cal:>12.2} cal/(mol K)  {joule:>12.2} J/(mol K)\n"));
    }
    out.push_str(&format!(
        "Tm {} ({})\n",
        format!("{:>9.2} °C", result.tm_celsius()).green(),
        result.method()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: &str) -> MeltRecord {
        MeltRecord {
            header: None,
            sequence: sequence.to_string(),
            complement: None,
        }
    }

    #[test]
    fn test_human_report_nearest_neighbor() {
        let result = ThermoResult::NearestNeighbor {
            enthalpy: -25800.0,
            entropy: -70.19,
            tm_celsius: 37.12,
            method: "all97",
        };
        let text = human_report(&record("AGCG"), &result);
        assert!(text.contains("AGCG"));
        assert!(text.contains("-25800.0 cal/mol"));
        assert!(text.contains("-107947.2 J/mol"));
        assert!(text.contains("cal/(mol K)"));
        assert!(text.contains("37.12 °C"));
        assert!(text.contains("(all97)"));
    }

    #[test]
    fn test_human_report_approximative_prints_no_energies() {
        let result = ThermoResult::Approximative {
            tm_celsius: 12.0,
            method: "wallace",
        };
        let text = human_report(&record("AGCG"), &result);
        assert!(!text.contains("cal/mol"));
        assert!(!text.contains("J/mol"));
        assert!(text.contains("12.00 °C"));
        assert!(text.contains("(wallace)"));
    }

    #[test]
    fn test_human_report_echoes_header_and_complement() {
        let mut rec = record("AGCT-");
        rec.header = Some(">probe".into());
        rec.complement = Some("TCGAA".into());
        let result = ThermoResult::Approximative {
            tm_celsius: 10.0,
            method: "wallace",
        };
        let text = human_report(&rec, &result);
        assert!(text.contains(">probe"));
        assert!(text.contains("TCGAA"));
    }

    #[test]
    fn test_json_report_is_flat_and_tagged() {
        let result = ThermoResult::NearestNeighbor {
            enthalpy: -25800.0,
            entropy: -70.19,
            tm_celsius: 37.12,
            method: "all97",
        };
        let line = json_report(&record("AGCG"), &result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["sequence"], "AGCG");
        assert_eq!(value["kind"], "nearest_neighbor");
        assert_eq!(value["enthalpy"], -25800.0);
        assert_eq!(value["method"], "all97");
        assert!(value.get("header").is_none());
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_json_report_keeps_header_when_present() {
        let mut rec = record("AGCG");
        rec.header = Some(">probe".into());
        let result = ThermoResult::Approximative {
            tm_celsius: 12.0,
            method: "wallace",
        };
        let line = json_report(&rec, &result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["header"], ">probe");
        assert_eq!(value["kind"], "approximative");
        assert!(value.get("enthalpy").is_none());
    }
}
