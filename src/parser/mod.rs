pub mod matching;
pub mod numeric;

use rust_decimal::Decimal;

use crate::config::ParserConfig;
use crate::decimal::{Money, Rate};
use crate::errors::ParseError;
use crate::types::{Field, LoanParameters};

pub use matching::{closest_field, levenshtein_distance, FieldMatch};
pub use numeric::{extract_number, whole_number};

/// one `<field>: <value>` line after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub field: Field,
    pub raw_key: String,
    pub raw_value: String,
    pub value: Decimal,
}

/// parser for loosely formatted loan descriptions.
///
/// Expects exactly four non-blank lines, `amount`, `interest`,
/// `downpayment` and `term` in that order. Field names may carry typos up
/// to the configured edit distance; the field is still taken from the
/// line's position, the name only has to be plausible.
#[derive(Debug, Clone, Default)]
pub struct InputParser {
    config: ParserConfig,
}

impl InputParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// parse a loan description into parameters, all-or-nothing
    pub fn parse(&self, raw_input: &str) -> Result<LoanParameters, ParseError> {
        let entries = self.parse_entries(raw_input)?;
        let value_of = |field: Field| entries[field_index(field)].value;

        let term_value = value_of(Field::Term);
        let term = whole_number(term_value).ok_or_else(|| ParseError::IncorrectValue {
            field: Field::Term,
            value: entries[field_index(Field::Term)].raw_value.clone(),
        })?;

        Ok(LoanParameters::new(
            Money::from_decimal(value_of(Field::Amount)),
            Rate::from_percentage(value_of(Field::Interest)),
            Money::from_decimal(value_of(Field::Downpayment)),
            term,
        ))
    }

    /// validate every line and extract its number, in canonical field order
    pub fn parse_entries(&self, raw_input: &str) -> Result<Vec<ParsedEntry>, ParseError> {
        let lines: Vec<&str> = raw_input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() != Field::ALL.len() {
            return Err(ParseError::WrongFieldCount {
                expected: Field::ALL.len(),
                found: lines.len(),
            });
        }

        lines
            .iter()
            .zip(Field::ALL)
            .enumerate()
            .map(|(index, (line, field))| self.parse_line(index + 1, line, field))
            .collect()
    }

    fn parse_line(&self, line_number: usize, line: &str, field: Field) -> Result<ParsedEntry, ParseError> {
        let (raw_key, raw_value) = line
            .split_once(self.config.field_delimiter.as_str())
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .ok_or(ParseError::MissingFieldOrValue { line: line_number })?;

        let nearest = closest_field(raw_key);
        if nearest.distance > self.config.max_field_distance {
            return Err(ParseError::UnrecognizedField {
                key: raw_key.to_string(),
            });
        }

        let value = extract_number(raw_value).ok_or_else(|| ParseError::IncorrectValue {
            field,
            value: raw_value.to_string(),
        })?;

        Ok(ParsedEntry {
            field,
            raw_key: raw_key.to_string(),
            raw_value: raw_value.to_string(),
            value,
        })
    }
}

fn field_index(field: Field) -> usize {
    match field {
        Field::Amount => 0,
        Field::Interest => 1,
        Field::Downpayment => 2,
        Field::Term => 3,
    }
}
