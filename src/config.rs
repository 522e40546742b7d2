use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result};
use crate::types::PaymentType;

/// edit distance a field name may be from its canonical spelling
pub const DEFAULT_MAX_FIELD_DISTANCE: usize = 2;

/// separator between a field name and its value
pub const DEFAULT_FIELD_DELIMITER: &str = ": ";

/// loan description parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub max_field_distance: usize,
    pub field_delimiter: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_field_distance: DEFAULT_MAX_FIELD_DISTANCE,
            field_delimiter: DEFAULT_FIELD_DELIMITER.to_string(),
        }
    }
}

impl ParserConfig {
    /// exact field names only
    pub fn strict() -> Self {
        Self {
            max_field_distance: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_delimiter.is_empty() {
            return Err(CalculatorError::InvalidConfiguration {
                message: "field delimiter must not be empty".to_string(),
            });
        }
        if self.field_delimiter.chars().any(|c| c.is_ascii_digit() || c == '\n') {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!(
                    "field delimiter {:?} must not contain digits or newlines",
                    self.field_delimiter
                ),
            });
        }
        Ok(())
    }
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub parser: ParserConfig,
    /// model used when the caller does not name one
    pub default_payment_type: PaymentType,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            default_payment_type: PaymentType::Annuity,
        }
    }
}

impl CalculatorConfig {
    /// load from a json document; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig =
            serde_json::from_str(json).map_err(|e| CalculatorError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalculatorError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.parser.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = CalculatorConfig::default();
        assert_eq!(config.parser.max_field_distance, 2);
        assert_eq!(config.parser.field_delimiter, ": ");
        assert_eq!(config.default_payment_type, PaymentType::Annuity);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CalculatorConfig::from_json(
            r#"{ "parser": { "max_field_distance": 1 }, "default_payment_type": "differentiated" }"#,
        )
        .unwrap();

        assert_eq!(config.parser.max_field_distance, 1);
        assert_eq!(config.parser.field_delimiter, ": ");
        assert_eq!(config.default_payment_type, PaymentType::Differentiated);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CalculatorConfig {
            parser: ParserConfig::strict(),
            default_payment_type: PaymentType::Differentiated,
        };
        let json = config.to_json_pretty().unwrap();
        assert_eq!(CalculatorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_delimiter() {
        let err = CalculatorConfig::from_json(r#"{ "parser": { "field_delimiter": "" } }"#).unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidConfiguration { .. }));

        let err = CalculatorConfig::from_json(r#"{ "parser": { "field_delimiter": "1" } }"#).unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(CalculatorConfig::from_json("{ not json").is_err());
    }
}
