pub mod annuity;
pub mod calendar;
pub mod differentiated;
pub mod schedule;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{LoanParameters, LoanResult, PaymentType};

pub use annuity::AnnuityPayment;
pub use differentiated::DifferentiatedPayment;
pub use schedule::{PaymentSchedule, ScheduledPayment};

/// quantities shared by both payment models, only built from valid parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    financed_principal: Money,
    annual_rate: Rate,
    term_years: u32,
    term_months: u32,
}

impl LoanTerms {
    pub fn from_parameters(parameters: &LoanParameters) -> Result<Self> {
        parameters.validate()?;

        Ok(Self {
            financed_principal: parameters.financed_principal(),
            annual_rate: parameters.interest(),
            term_years: parameters.term(),
            term_months: parameters.term_months(),
        })
    }

    pub fn financed_principal(&self) -> Money {
        self.financed_principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// equal share of principal repaid each month, unrounded
    pub fn principal_share(&self) -> Money {
        self.financed_principal / Decimal::from(self.term_months)
    }
}

/// a repayment model.
///
/// `as_of` is the moment the calculation is made; models whose figures
/// depend on the calendar read the current month and year from it.
pub trait PaymentModel: fmt::Debug {
    fn payment_type(&self) -> PaymentType;

    fn terms(&self) -> &LoanTerms;

    /// monthly payment in cents
    fn monthly_payment(&self, as_of: DateTime<Utc>) -> Money;

    /// sum of all payments over the term, in cents
    fn total_payout(&self, as_of: DateTime<Utc>) -> Money;

    /// month-by-month breakdown
    fn schedule(&self, as_of: DateTime<Utc>) -> PaymentSchedule;

    /// total payout minus the financed principal
    fn accrued_interest(&self, as_of: DateTime<Utc>) -> Money {
        accrued_interest(self.total_payout(as_of), self.terms())
    }

    fn compute_all(&self, as_of: DateTime<Utc>) -> LoanResult {
        let monthly_payment = self.monthly_payment(as_of);
        let total_payout = self.total_payout(as_of);
        let amount_of_accrued_interest = accrued_interest(total_payout, self.terms());

        LoanResult {
            payment_type: self.payment_type(),
            monthly_payment,
            total_payout,
            amount_of_accrued_interest,
        }
    }
}

fn accrued_interest(total_payout: Money, terms: &LoanTerms) -> Money {
    (total_payout - terms.financed_principal).round_cents()
}

/// build the model for a payment type
pub fn model_for(payment_type: PaymentType, parameters: &LoanParameters) -> Result<Box<dyn PaymentModel>> {
    let terms = LoanTerms::from_parameters(parameters)?;
    Ok(match payment_type {
        PaymentType::Annuity => Box::new(AnnuityPayment::new(terms)),
        PaymentType::Differentiated => Box::new(DifferentiatedPayment::new(terms)),
    })
}
