//! Parser for netlist bodies.

use tracing::trace;

use super::lexer::{Field, Lexer};
use crate::circuit::BranchRecord;
use crate::error::{NodalError, Result};

/// Fields per branch record.
pub const RECORD_FIELDS: usize = 9;

/// Parser turning a token stream into branch records.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer }
    }

    /// Parse every record up to the end of input.
    ///
    /// Only fully-populated records are accepted; input ending partway
    /// through a record is an error.
    pub fn parse(&mut self) -> Result<Vec<BranchRecord>> {
        let mut records = Vec::new();

        loop {
            let mut fields: Vec<Field> = Vec::with_capacity(RECORD_FIELDS);
            while fields.len() < RECORD_FIELDS {
                match self.lexer.next_field()? {
                    Some(field) => fields.push(field),
                    None => break,
                }
            }

            match fields.len() {
                0 => break,
                RECORD_FIELDS => {
                    let record = self.parse_record(&fields, records.len() + 1)?;
                    trace!(line = record.line, "parsed branch record");
                    records.push(record);
                }
                found => {
                    return Err(NodalError::IncompleteRecord {
                        line: fields[0].line,
                        found,
                    });
                }
            }
        }

        Ok(records)
    }

    fn parse_record(&self, fields: &[Field], position: usize) -> Result<BranchRecord> {
        let line = fields[0].line;

        let index = parse_integer(&fields[0])?;
        if index != position {
            return Err(NodalError::parse(
                line,
                format!("branch number {} out of sequence, expected {}", index, position),
            ));
        }

        // Endpoints are packed as two digits: 12 is the branch 1 → 2
        let packed = parse_integer(&fields[1])?;
        if packed > 99 {
            return Err(NodalError::parse(
                fields[1].line,
                format!("node pair '{}' must be two digits <begin><end>", fields[1].text),
            ));
        }

        let values: Vec<f64> = fields[2..].iter().map(|f| f.value).collect();

        Ok(BranchRecord {
            line,
            begin: packed / 10,
            end: packed % 10,
            resistance: values[0],
            inductive_reactance: values[1],
            capacitive_reactance: values[2],
            emf_magnitude: values[3],
            emf_angle: values[4],
            current_magnitude: values[5],
            current_angle: values[6],
        })
    }
}

fn parse_integer(field: &Field) -> Result<usize> {
    field.text.parse::<usize>().map_err(|_| {
        NodalError::parse(
            field.line,
            format!("expected a non-negative integer, got '{}'", field.text),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_body(body: &str) -> Result<Vec<BranchRecord>> {
        Parser::new(Lexer::new(body)).parse()
    }

    #[test]
    fn test_parse_record() {
        let records = parse_body("1 12 10 5 0 100 30 0 0").unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!((r.begin, r.end), (1, 2));
        assert_eq!(r.resistance, 10.0);
        assert_eq!(r.inductive_reactance, 5.0);
        assert_eq!(r.emf_magnitude, 100.0);
        assert_eq!(r.emf_angle, 30.0);
    }

    #[test]
    fn test_records_may_span_lines() {
        let records = parse_body("1 12 1k 0 0\n 0 0 0 0\n2 21 2 0 0 0 0 1 -90\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].resistance, 1000.0);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[1].current_angle, -90.0);
    }

    #[test]
    fn test_incomplete_trailing_record() {
        let err = parse_body("1 12 10 0 0 0 0 0 0\n2 23 5 0").unwrap_err();
        assert!(matches!(err, NodalError::IncompleteRecord { line: 2, found: 4 }));
    }

    #[test]
    fn test_out_of_sequence() {
        let err = parse_body("2 12 10 0 0 0 0 0 0").unwrap_err();
        assert!(matches!(err, NodalError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_bad_fields() {
        assert!(matches!(
            parse_body("1 12 ten 0 0 0 0 0 0"),
            Err(NodalError::LexerError { line: 1, column: 6, .. })
        ));
        assert!(matches!(
            parse_body("1 1.5 1 0 0 0 0 0 0"),
            Err(NodalError::ParseError { .. })
        ));
        assert!(matches!(
            parse_body("1 123 1 0 0 0 0 0 0"),
            Err(NodalError::ParseError { .. })
        ));
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_body("  \n# nothing here\n").unwrap().is_empty());
    }
}
