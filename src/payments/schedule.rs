use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PaymentType;

/// one month of a repayment schedule; money columns are in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    /// calendar month, 1 = january
    pub month: u32,
    pub days_in_month: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
}

/// full repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    pub payment_type: PaymentType,
    pub calculated_at: DateTime<Utc>,
    pub principal: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_payment: Money,
    pub total_interest: Money,
}

impl PaymentSchedule {
    pub fn new(
        payment_type: PaymentType,
        calculated_at: DateTime<Utc>,
        principal: Money,
        payments: Vec<ScheduledPayment>,
    ) -> Self {
        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .sum::<Money>()
            .round_cents();

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .sum::<Money>()
            .round_cents();

        Self {
            payment_type,
            calculated_at,
            principal,
            payments,
            total_payment,
            total_interest,
        }
    }

    /// payment by 1-based number
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(1)?;
        self.payments.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn first(&self) -> Option<&ScheduledPayment> {
        self.payments.first()
    }

    pub fn last(&self) -> Option<&ScheduledPayment> {
        self.payments.last()
    }
}
