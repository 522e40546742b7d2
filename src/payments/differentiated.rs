use chrono::{DateTime, Datelike, Utc};

use crate::decimal::Money;
use crate::payments::calendar::{
    common_month_days, days_in_current_month, days_in_current_year, month_cycle_after,
};
use crate::payments::schedule::{PaymentSchedule, ScheduledPayment};
use crate::payments::{LoanTerms, PaymentModel};
use crate::types::PaymentType;

/// equal principal portions with interest on the remaining balance.
///
/// Interest for a month is `balance * annual_rate * days_in_month /
/// days_in_year`, where the year length is that of the year the
/// calculation is made in. The schedule starts the month after `as_of`
/// and walks common-year month lengths, wrapping december to january,
/// for `term * 12` payments.
#[derive(Debug, Clone)]
pub struct DifferentiatedPayment {
    terms: LoanTerms,
}

impl DifferentiatedPayment {
    pub fn new(terms: LoanTerms) -> Self {
        Self { terms }
    }

    /// one payment on `balance` for a month of `days_in_month` days
    pub fn payment_for(&self, balance: Money, days_in_month: u32, days_in_year: u32) -> Money {
        let interest = balance.apply_rate(self.terms.annual_rate, days_in_month, days_in_year);
        (self.terms.principal_share() + interest).round_cents()
    }
}

impl PaymentModel for DifferentiatedPayment {
    fn payment_type(&self) -> PaymentType {
        PaymentType::Differentiated
    }

    fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// first payment, as if made in the current calendar month
    fn monthly_payment(&self, as_of: DateTime<Utc>) -> Money {
        self.payment_for(
            self.terms.financed_principal,
            days_in_current_month(as_of),
            days_in_current_year(as_of),
        )
    }

    fn total_payout(&self, as_of: DateTime<Utc>) -> Money {
        self.schedule(as_of).total_payment
    }

    fn schedule(&self, as_of: DateTime<Utc>) -> PaymentSchedule {
        let days_in_year = days_in_current_year(as_of);
        let principal_share = self.terms.principal_share();
        let principal_portion = principal_share.round_cents();

        let mut payments = Vec::with_capacity(self.terms.term_months as usize);
        let mut balance = self.terms.financed_principal;

        for (i, month) in month_cycle_after(as_of.month(), self.terms.term_months).enumerate() {
            let days_in_month = common_month_days(month);
            let payment_amount = self.payment_for(balance, days_in_month, days_in_year);
            let ending_balance = balance - principal_share;

            payments.push(ScheduledPayment {
                payment_number: i as u32 + 1,
                month,
                days_in_month,
                beginning_balance: balance.round_cents(),
                payment_amount,
                principal_portion,
                interest_portion: payment_amount - principal_portion,
                ending_balance: ending_balance.round_cents().max(Money::ZERO),
            });

            balance = ending_balance;
        }

        PaymentSchedule::new(
            PaymentType::Differentiated,
            as_of,
            self.terms.financed_principal,
            payments,
        )
    }
}
