//! Field scanner for netlist bodies.
//!
//! A record body is a stream of whitespace-separated numeric fields. The
//! scanner splits that stream into [`Field`]s, resolving SI suffixes as it
//! goes, and reports anything that is not a number with its position.

use crate::error::{NodalError, Result};

/// SI suffixes accepted after a number.
const SI_SUFFIXES: [(char, f64); 9] = [
    ('p', 1e-12),
    ('n', 1e-9),
    ('u', 1e-6),
    ('µ', 1e-6),
    ('m', 1e-3),
    ('k', 1e3),
    ('K', 1e3),
    ('M', 1e6),
    ('G', 1e9),
];

/// One numeric field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Source text, suffix included
    pub text: String,
    /// Value with the suffix applied
    pub value: f64,
    /// Line number (1-indexed, counted from the top of the file)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Splits a netlist body into numeric fields.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::starting_at_line(input, 1)
    }

    /// Create a lexer whose first line is reported as `line`.
    pub fn starting_at_line(input: &'a str, line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            line,
            column: 1,
        }
    }

    /// Next field, or `None` at the end of input.
    pub fn next_field(&mut self) -> Result<Option<Field>> {
        self.skip_blanks();

        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || is_comment_start(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }

        if text.is_empty() {
            return Ok(None);
        }
        if text.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            return Err(NodalError::lexer(
                line,
                column,
                format!("unexpected word '{}' inside a record", text),
            ));
        }

        match parse_value(&text) {
            Some(value) => Ok(Some(Field {
                text,
                value,
                line,
                column,
            })),
            None => Err(NodalError::lexer(
                line,
                column,
                format!("malformed number '{}'", text),
            )),
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    // Whitespace, line breaks and comments up to the next field.
    fn skip_blanks(&mut self) {
        let mut in_comment = false;
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                in_comment = false;
            } else if is_comment_start(ch) {
                in_comment = true;
            } else if !in_comment && !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }
}

fn is_comment_start(ch: char) -> bool {
    ch == '#' || ch == ';'
}

/// Parse a finite number with an optional SI suffix (`4.7k`, `1e-3`, `10u`).
pub fn parse_value(text: &str) -> Option<f64> {
    let (digits, scale) = text
        .chars()
        .last()
        .and_then(|last| SI_SUFFIXES.iter().find(|(suffix, _)| *suffix == last))
        .map_or((text, 1.0), |&(suffix, scale)| {
            (&text[..text.len() - suffix.len_utf8()], scale)
        });

    digits
        .parse::<f64>()
        .ok()
        .map(|v| v * scale)
        .filter(|v| v.is_finite())
}
