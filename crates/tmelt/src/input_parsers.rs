use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::{anyhow, Result};
use paste::paste;

// ============================================================
//  FASTA-like batch parser
// ============================================================

/// One melting request: a sequence 5'->3' with an optional header
/// and an optional aligned complement 3'->5'.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeltRecord {
    pub header: Option<String>,
    pub sequence: String,
    pub complement: Option<String>,
}

impl MeltRecord {
    /// First word of the header without the '>' marker, or "anonymous".
    pub fn label(&self) -> &str {
        self.header
            .as_deref()
            .and_then(|h| h.strip_prefix('>'))
            .and_then(|h| h.split_whitespace().next())
            .unwrap_or("anonymous")
    }
}

fn close_record(
    records: &mut Vec<MeltRecord>,
    header: Option<String>,
    sequence: Option<String>,
    complement: Option<String>,
) -> Result<()> {
    match (header, sequence) {
        (header, Some(sequence)) => {
            records.push(MeltRecord { header, sequence, complement });
            Ok(())
        }
        (Some(header), None) => Err(anyhow!("record '{header}' is missing a sequence line")),
        (None, None) => Ok(()),
    }
}

/// Core parsing logic shared by all adapters.
///
/// A record is an optional '>' header, a sequence line and an optional
/// complement line. Records are separated by the next header, a blank
/// line, or the end of input.
pub fn read_melt_records<R: BufRead>(reader: R) -> Result<Vec<MeltRecord>> {
    let mut records = Vec::new();
    let mut header: Option<String> = None;
    let mut sequence: Option<String> = None;
    let mut complement: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            close_record(&mut records, header.take(), sequence.take(), complement.take())?;
            continue;
        }

        if line.starts_with('>') {
            close_record(&mut records, header.take(), sequence.take(), complement.take())?;
            header = Some(line.to_string());
        } else if sequence.is_none() {
            let token = line.split_whitespace().next().unwrap();
            sequence = Some(token.to_string());
        } else if complement.is_none() {
            let token = line.split_whitespace().next().unwrap();
            complement = Some(token.to_string());
        } else {
            // A third bare line opens the next headerless record.
            close_record(&mut records, header.take(), sequence.take(), complement.take())?;
            let token = line.split_whitespace().next().unwrap();
            sequence = Some(token.to_string());
        }
    }
    close_record(&mut records, header, sequence, complement)?;

    if records.is_empty() {
        return Err(anyhow!("no records in input"));
    }
    Ok(records)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
///
/// Example:
/// ```ignore
/// define_input_variants!(read_melt_records, Result<Vec<MeltRecord>>);
/// ```
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type BatchResult = Result<Vec<MeltRecord>>;

define_input_variants!(read_melt_records, BatchResult);

// ============================================================
//  Unit tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bare_sequence() {
        let records = read_melt_records_string("AGCGTGGA\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, None);
        assert_eq!(records[0].sequence, "AGCGTGGA");
        assert_eq!(records[0].complement, None);
        assert_eq!(records[0].label(), "anonymous");
    }

    #[test]
    fn test_header_sequence_complement() {
        let input = ">probe 37C buffer\nAGCT-\nTCGAA\n";
        let records = read_melt_records_string(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, Some(">probe 37C buffer".into()));
        assert_eq!(records[0].sequence, "AGCT-");
        assert_eq!(records[0].complement, Some("TCGAA".into()));
        assert_eq!(records[0].label(), "probe");
    }

    #[test]
    fn test_headers_separate_records() {
        let input = ">a\nAGCG\n>b\nTTTTT\nAAAAA\n";
        let records = read_melt_records_string(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, "AGCG");
        assert_eq!(records[0].complement, None);
        assert_eq!(records[1].label(), "b");
        assert_eq!(records[1].complement, Some("AAAAA".into()));
    }

    #[test]
    fn test_blank_lines_separate_bare_records() {
        let input = "AGCG\n\nTTTT\n\n\n";
        let records = read_melt_records_string(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sequence, "TTTT");
    }

    #[test]
    fn test_third_bare_line_opens_new_record() {
        let input = "AGCT\nTCGA\nGGGG\n";
        let records = read_melt_records_string(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].complement, Some("TCGA".into()));
        assert_eq!(records[1].sequence, "GGGG");
        assert_eq!(records[1].complement, None);
    }

    #[test]
    fn test_header_without_sequence_fails() {
        assert!(read_melt_records_string(">lonely\n").is_err());
        assert!(read_melt_records_string(">a\n>b\nAGCG\n").is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(read_melt_records_string("").is_err());
        assert!(read_melt_records_string("\n\n").is_err());
    }

    #[test]
    fn test_whitespace_and_trailing_comments_are_trimmed() {
        let input = "  AGCG   extra tokens ignored\n";
        let records = read_melt_records_string(input).unwrap();
        assert_eq!(records[0].sequence, "AGCG");
    }
}
