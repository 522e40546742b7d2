//! serialization support for calculations

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::payments::PaymentSchedule;
use crate::types::{CalculationId, LoanParameters, LoanResult, PaymentType};

/// serializable view of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub calculation_id: CalculationId,
    pub payment_type: PaymentType,
    pub parameters: ParametersView,
    pub result: LoanResult,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schedule: Option<PaymentSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersView {
    pub amount: Money,
    pub interest: Rate,
    pub downpayment: Money,
    pub term_years: u32,
    pub term_months: u32,
    pub financed_principal: Money,
}

impl ParametersView {
    pub fn from_parameters(parameters: &LoanParameters) -> Self {
        ParametersView {
            amount: parameters.amount(),
            interest: parameters.interest(),
            downpayment: parameters.downpayment(),
            term_years: parameters.term(),
            term_months: parameters.term_months(),
            financed_principal: parameters.financed_principal(),
        }
    }
}

impl LoanReport {
    pub fn new(
        calculation_id: CalculationId,
        parameters: LoanParameters,
        result: LoanResult,
        schedule: Option<PaymentSchedule>,
    ) -> Self {
        LoanReport {
            calculation_id,
            payment_type: result.payment_type,
            parameters: ParametersView::from_parameters(&parameters),
            result,
            schedule,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
