use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};

/// largest accepted loan amount
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// largest accepted nominal annual interest, in percent
pub const MAX_INTEREST_PERCENT: i64 = 1_000;

/// longest accepted term, in years
pub const MAX_TERM_YEARS: u32 = 100;

/// unique identifier correlating the audit events of one calculation
pub type CalculationId = Uuid;

/// the four loan description fields, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Amount,
    Interest,
    Downpayment,
    Term,
}

impl Field {
    /// canonical order; the i-th input line always maps to `ALL[i]`
    pub const ALL: [Field; 4] = [Field::Amount, Field::Interest, Field::Downpayment, Field::Term];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Interest => "interest",
            Field::Downpayment => "downpayment",
            Field::Term => "term",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// repayment model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// equal payment amounts throughout the term
    Annuity,
    /// equal principal portions, interest on the remaining balance
    Differentiated,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Annuity => "annuity",
            PaymentType::Differentiated => "differentiated",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = CalculatorError;

    /// accepts the long names and the `ann`/`dif` short forms
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annuity" | "ann" => Ok(PaymentType::Annuity),
            "differentiated" | "dif" => Ok(PaymentType::Differentiated),
            _ => Err(CalculatorError::InvalidPaymentType {
                value: s.to_string(),
            }),
        }
    }
}

/// loan parameters recovered from a loan description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    amount: Money,
    interest: Rate,
    downpayment: Money,
    term: u32,
}

impl LoanParameters {
    /// `interest` is the nominal annual rate, `term` is in whole years
    pub fn new(amount: Money, interest: Rate, downpayment: Money, term: u32) -> Self {
        Self {
            amount,
            interest,
            downpayment,
            term,
        }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn interest(&self) -> Rate {
        self.interest
    }

    pub fn downpayment(&self) -> Money {
        self.downpayment
    }

    /// term in years
    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn term_months(&self) -> u32 {
        self.term.saturating_mul(12)
    }

    /// the sum actually amortized
    pub fn financed_principal(&self) -> Money {
        self.amount - self.downpayment
    }

    /// reject parameters the payment models have no meaningful answer for
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() || self.amount > Money::from_major(MAX_AMOUNT) {
            return Err(CalculatorError::InvalidParameters {
                message: format!("amount must be in (0, {}], got {}", MAX_AMOUNT, self.amount),
            });
        }
        let percent = self.interest.as_percentage();
        if percent < Decimal::ZERO || percent > Decimal::from(MAX_INTEREST_PERCENT) {
            return Err(CalculatorError::InvalidParameters {
                message: format!(
                    "interest must be in [0, {}]%, got {}",
                    MAX_INTEREST_PERCENT, self.interest
                ),
            });
        }
        if self.downpayment.is_negative() || self.downpayment >= self.amount {
            return Err(CalculatorError::InvalidParameters {
                message: format!(
                    "downpayment must be in [0, amount): downpayment {}, amount {}",
                    self.downpayment, self.amount
                ),
            });
        }
        if self.term == 0 || self.term > MAX_TERM_YEARS {
            return Err(CalculatorError::InvalidParameters {
                message: format!("term must be 1 to {} years, got {}", MAX_TERM_YEARS, self.term),
            });
        }
        Ok(())
    }
}

/// figures derived from a full computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    pub payment_type: PaymentType,
    pub monthly_payment: Money,
    pub total_payout: Money,
    pub amount_of_accrued_interest: Money,
}
