use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::debug;
use tm_sequence::{Base, GAP_CHAR, Hybridization, Slot};

use crate::error::MeltingError;
use crate::motif::{Motif, Step};

#[derive(Debug)]
pub enum ParamError {
    Io(std::io::Error),
    Parse { line: usize, msg: String },
    UnknownSection { line: usize, section: String },
    Duplicate { line: usize, motif: String },
    Missing { table: String, what: &'static str },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Io(e) => write!(f, "I/O error: {e}"),
            ParamError::Parse { line, msg } => {
                write!(f, "Parse error on line {line}: {msg}")
            }
            ParamError::UnknownSection { line, section } => {
                write!(f, "Unknown parameter file section on line {line}: '{section}'")
            }
            ParamError::Duplicate { line, motif } => {
                write!(f, "Line {line} redefines motif {motif}")
            }
            ParamError::Missing { table, what } => {
                write!(f, "Parameter table '{table}' is missing its {what}")
            }
        }
    }
}

impl std::error::Error for ParamError {}

impl From<std::io::Error> for ParamError {
    fn from(e: std::io::Error) -> Self {
        ParamError::Io(e)
    }
}

/// Enthalpy in cal/mol, entropy in cal/(mol·K).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermoPair {
    pub dh: f64,
    pub ds: f64,
}

enum Section {
    None,
    Info,
    Salt,
    Init,
    Stack,
    Mismatch,
    TerminalMismatch,
    Dangling,
    Loop,
}

impl TryFrom<&str> for Section {
    type Error = ();
    fn try_from(s: &str) -> Result<Self, ()> {
        match s {
            "info" => Ok(Section::Info),
            "salt" => Ok(Section::Salt),
            "init" => Ok(Section::Init),
            "stack" => Ok(Section::Stack),
            "mismatch" => Ok(Section::Mismatch),
            "terminal_mismatch" => Ok(Section::TerminalMismatch),
            "dangling" => Ok(Section::Dangling),
            "loop" => Ok(Section::Loop),
            _ => Err(()),
        }
    }
}

fn parse_f64(token: &str, line: usize) -> Result<f64, ParamError> {
    token.parse::<f64>().map_err(|_| ParamError::Parse {
        line,
        msg: format!("expected a number, found '{token}'"),
    })
}

fn parse_slot(c: char, token: &str, line: usize) -> Result<Slot, ParamError> {
    if c == GAP_CHAR {
        return Ok(None);
    }
    Base::try_from(c).map(Some).map_err(|_| ParamError::Parse {
        line,
        msg: format!("invalid base '{c}' in motif '{token}'"),
    })
}

fn parse_window(token: &str, line: usize) -> Result<Step, ParamError> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() != 5 || chars[2] != '/' {
        return Err(ParamError::Parse {
            line,
            msg: format!("expected a window like XY/WZ, found '{token}'"),
        });
    }
    Ok(Step {
        top: (
            parse_slot(chars[0], token, line)?,
            parse_slot(chars[1], token, line)?,
        ),
        bottom: (
            parse_slot(chars[3], token, line)?,
            parse_slot(chars[4], token, line)?,
        ),
    })
}

/// One named set of tabulated nearest-neighbor parameters.
#[derive(Clone, Debug)]
pub struct ParameterTable {
    name: String,
    citation: String,
    hybridizations: Vec<Hybridization>,
    salt_coefficient: f64,
    symmetric: bool,
    motifs: AHashMap<Motif, ThermoPair>,
}

impl ParameterTable {
    pub fn from_parameter_file<P: AsRef<Path>>(path: P) -> Result<Self, ParamError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Parses a table shipped inside the binary.
    pub fn from_embedded(text: &str) -> Result<Self, ParamError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParamError> {
        let mut name: Option<String> = None;
        let mut citation = String::new();
        let mut hybridizations: Vec<Hybridization> = Vec::new();
        let mut salt_coefficient: Option<f64> = None;
        let mut raw: Vec<(usize, Motif, ThermoPair)> = Vec::new();
        let mut section = Section::None;

        for (idx, line) in reader.lines().enumerate() {
            let lineno = idx + 1;
            let line = line?;
            let line = line.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('#') {
                let rest = rest.trim();
                section = Section::try_from(rest).map_err(|_| ParamError::UnknownSection {
                    line: lineno,
                    section: rest.to_string(),
                })?;
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            match section {
                Section::None => {
                    return Err(ParamError::Parse {
                        line: lineno,
                        msg: "data before the first section header".to_string(),
                    });
                }
                Section::Info => match tokens[0] {
                    "name" if tokens.len() == 2 => name = Some(tokens[1].to_string()),
                    "citation" => {
                        citation = line["citation".len()..].trim().to_string();
                    }
                    "hybridization" => {
                        for token in &tokens[1..] {
                            let hyb = token.parse().map_err(|_| ParamError::Parse {
                                line: lineno,
                                msg: format!("unknown hybridization '{token}'"),
                            })?;
                            hybridizations.push(hyb);
                        }
                    }
                    other => {
                        return Err(ParamError::Parse {
                            line: lineno,
                            msg: format!("unknown info entry '{other}'"),
                        });
                    }
                },
                Section::Salt => match tokens[..] {
                    ["coefficient", value] => {
                        salt_coefficient = Some(parse_f64(value, lineno)?);
                    }
                    _ => {
                        return Err(ParamError::Parse {
                            line: lineno,
                            msg: "expected 'coefficient <value>'".to_string(),
                        });
                    }
                },
                Section::Init => {
                    let [row, dh, ds] = tokens[..] else {
                        return Err(ParamError::Parse {
                            line: lineno,
                            msg: "expected '<row> <dH> <dS>'".to_string(),
                        });
                    };
                    let motif = match row {
                        "init" => Motif::Init,
                        "init_A/T" => Motif::InitTerminalAt,
                        "init_G/C" => Motif::InitTerminalGc,
                        "sym" => Motif::Symmetry,
                        other => {
                            return Err(ParamError::Parse {
                                line: lineno,
                                msg: format!("unknown init row '{other}'"),
                            });
                        }
                    };
                    let pair = ThermoPair {
                        dh: parse_f64(dh, lineno)?,
                        ds: parse_f64(ds, lineno)?,
                    };
                    raw.push((lineno, motif, pair));
                }
                Section::Stack
                | Section::Mismatch
                | Section::TerminalMismatch
                | Section::Dangling => {
                    let [window, dh, ds] = tokens[..] else {
                        return Err(ParamError::Parse {
                            line: lineno,
                            msg: "expected '<XY/WZ> <dH> <dS>'".to_string(),
                        });
                    };
                    let step = parse_window(window, lineno)?;
                    let motif = match section {
                        Section::Stack => Motif::Stack(step),
                        Section::Mismatch => Motif::InternalMismatch(step),
                        Section::TerminalMismatch => Motif::TerminalMismatch(step),
                        _ => Motif::Dangling(step),
                    };
                    let pair = ThermoPair {
                        dh: parse_f64(dh, lineno)?,
                        ds: parse_f64(ds, lineno)?,
                    };
                    raw.push((lineno, motif, pair));
                }
                Section::Loop => {
                    let [len, dh, ds] = tokens[..] else {
                        return Err(ParamError::Parse {
                            line: lineno,
                            msg: "expected '<length> <dH> <dS>'".to_string(),
                        });
                    };
                    let len = len.parse::<usize>().map_err(|_| ParamError::Parse {
                        line: lineno,
                        msg: format!("expected a loop length, found '{len}'"),
                    })?;
                    let pair = ThermoPair {
                        dh: parse_f64(dh, lineno)?,
                        ds: parse_f64(ds, lineno)?,
                    };
                    raw.push((lineno, Motif::HairpinLoop(len), pair));
                }
            }
        }

        let table_label = name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        let Some(name) = name else {
            return Err(ParamError::Missing {
                table: table_label,
                what: "name",
            });
        };
        if hybridizations.is_empty() {
            return Err(ParamError::Missing {
                table: table_label,
                what: "hybridization list",
            });
        }
        let Some(salt_coefficient) = salt_coefficient else {
            return Err(ParamError::Missing {
                table: table_label,
                what: "salt coefficient",
            });
        };

        // Rotation folds motifs together only when both strands share a
        // backbone; hybrid windows stay as written.
        let symmetric = !hybridizations.contains(&Hybridization::DnaRna);
        let mut motifs = AHashMap::with_capacity(raw.len());
        for (lineno, motif, pair) in raw {
            let key = motif.normalized(symmetric);
            if motifs.insert(key, pair).is_some() {
                return Err(ParamError::Duplicate {
                    line: lineno,
                    motif: key.to_string(),
                });
            }
        }

        for (motif, what) in [
            (Motif::Init, "init row 'init'"),
            (Motif::InitTerminalAt, "init row 'init_A/T'"),
            (Motif::InitTerminalGc, "init row 'init_G/C'"),
            (Motif::Symmetry, "init row 'sym'"),
        ] {
            if !motifs.contains_key(&motif) {
                return Err(ParamError::Missing {
                    table: table_label,
                    what,
                });
            }
        }

        debug!("parsed parameter table '{}' ({} motifs)", name, motifs.len());
        Ok(ParameterTable {
            name,
            citation,
            hybridizations,
            salt_coefficient,
            symmetric,
            motifs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn citation(&self) -> &str {
        &self.citation
    }

    pub fn hybridizations(&self) -> &[Hybridization] {
        &self.hybridizations
    }

    pub fn applies_to(&self, hybridization: Hybridization) -> bool {
        self.hybridizations.contains(&hybridization)
    }

    pub fn salt_coefficient(&self) -> f64 {
        self.salt_coefficient
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// Looks up a motif under the table's normalization.
    pub fn get(&self, motif: Motif) -> Option<ThermoPair> {
        self.motifs.get(&motif.normalized(self.symmetric)).copied()
    }

    /// A missing motif is a defined failure, never a silent zero.
    pub fn require(&self, motif: Motif, stage: &'static str) -> Result<ThermoPair, MeltingError> {
        self.get(motif)
            .ok_or(MeltingError::UnknownMotif { motif, stage })
    }
}
