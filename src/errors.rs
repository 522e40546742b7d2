use thiserror::Error;

use crate::types::Field;

/// malformed loan description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("wrong field count: expected {expected} non-empty lines, found {found}")]
    WrongFieldCount {
        expected: usize,
        found: usize,
    },

    #[error("missing field or value on line {line}")]
    MissingFieldOrValue {
        line: usize,
    },

    #[error("unrecognized field: {key}")]
    UnrecognizedField {
        key: String,
    },

    #[error("incorrect value for field {field}: {value:?}")]
    IncorrectValue {
        field: Field,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid payment type: {value:?} (expected annuity/ann or differentiated/dif)")]
    InvalidPaymentType {
        value: String,
    },

    #[error("invalid loan parameters: {message}")]
    InvalidParameters {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
