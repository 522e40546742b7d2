use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::payments::calendar::{common_month_days, month_cycle_after};
use crate::payments::schedule::{PaymentSchedule, ScheduledPayment};
use crate::payments::{LoanTerms, PaymentModel};
use crate::types::PaymentType;

/// equal monthly payments over the whole term
#[derive(Debug, Clone)]
pub struct AnnuityPayment {
    terms: LoanTerms,
}

impl AnnuityPayment {
    pub fn new(terms: LoanTerms) -> Self {
        Self { terms }
    }

    /// r (1 + r)^n / ((1 + r)^n - 1); `None` for a zero rate
    pub fn annuity_factor(&self) -> Option<Decimal> {
        let r = self.terms.monthly_rate().as_decimal();
        if r.is_zero() {
            return None;
        }

        let base = Decimal::ONE + r;
        let mut compound = Decimal::ONE;
        for _ in 0..self.terms.term_months {
            match compound.checked_mul(base) {
                Some(next) => compound = next,
                // past the decimal range the factor has converged to r
                None => return Some(r),
            }
        }

        Some(r * compound / (compound - Decimal::ONE))
    }
}

impl PaymentModel for AnnuityPayment {
    fn payment_type(&self) -> PaymentType {
        PaymentType::Annuity
    }

    fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    fn monthly_payment(&self, _as_of: DateTime<Utc>) -> Money {
        match self.annuity_factor() {
            Some(factor) => (self.terms.financed_principal * factor).round_cents(),
            // no interest: straight-line repayment
            None => self.terms.principal_share().round_cents(),
        }
    }

    /// rounded payment times the number of months
    fn total_payout(&self, as_of: DateTime<Utc>) -> Money {
        (self.monthly_payment(as_of) * Decimal::from(self.terms.term_months)).round_cents()
    }

    fn schedule(&self, as_of: DateTime<Utc>) -> PaymentSchedule {
        let payment = self.monthly_payment(as_of);
        let monthly_rate = self.terms.monthly_rate().as_decimal();
        let term_months = self.terms.term_months;

        let mut payments = Vec::with_capacity(term_months as usize);
        let mut balance = self.terms.financed_principal;

        for (i, month) in month_cycle_after(as_of.month(), term_months).enumerate() {
            let payment_number = i as u32 + 1;
            let interest_portion = (balance * monthly_rate).round_cents();

            // the final payment clears whatever rounding left behind
            let (payment_amount, principal_portion) = if payment_number == term_months {
                (balance + interest_portion, balance)
            } else {
                (payment, payment - interest_portion)
            };
            let ending_balance = balance - principal_portion;

            payments.push(ScheduledPayment {
                payment_number,
                month,
                days_in_month: common_month_days(month),
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
            });

            balance = ending_balance;
        }

        PaymentSchedule::new(
            PaymentType::Annuity,
            as_of,
            self.terms.financed_principal,
            payments,
        )
    }
}
