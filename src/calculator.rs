use chrono::{DateTime, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use std::fmt;

use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::{CalculatorError, Result};
use crate::events::{Event, EventStore};
use crate::parser::InputParser;
use crate::payments::{model_for, PaymentModel, PaymentSchedule};
use crate::report::LoanReport;
use crate::types::{CalculationId, LoanParameters, LoanResult, PaymentType};

/// loan calculator for one set of parameters and one payment type.
///
/// Figures are recomputed on every call. Differentiated figures depend on
/// the calendar month and year at the time of the call, read from the
/// attached time provider or the system clock when none is set.
pub struct LoanCalculator<'t> {
    id: CalculationId,
    parameters: LoanParameters,
    model: Box<dyn PaymentModel>,
    time: Option<&'t SafeTimeProvider>,
    events: EventStore,
}

impl<'t> LoanCalculator<'t> {
    /// create from already parsed parameters
    pub fn new(parameters: LoanParameters, payment_type: PaymentType) -> Result<Self> {
        Ok(Self {
            id: CalculationId::new_v4(),
            model: model_for(payment_type, &parameters)?,
            parameters,
            time: None,
            events: EventStore::new(),
        })
    }

    /// parse a loan description and pick the model by name (`ann`, `dif`, ...)
    pub fn from_input(raw_input: &str, payment_type: &str) -> Result<Self> {
        Self::builder().input(raw_input).payment_type_name(payment_type).build()
    }

    pub fn builder() -> LoanCalculatorBuilder<'t> {
        LoanCalculatorBuilder::new()
    }

    /// use this time provider instead of the system clock
    pub fn set_time(&mut self, time: &'t SafeTimeProvider) {
        self.time = Some(time);
    }

    pub fn id(&self) -> CalculationId {
        self.id
    }

    pub fn parameters(&self) -> &LoanParameters {
        &self.parameters
    }

    pub fn payment_type(&self) -> PaymentType {
        self.model.payment_type()
    }

    pub fn monthly_payment(&self) -> Money {
        self.model.monthly_payment(self.now())
    }

    pub fn total_payout(&self) -> Money {
        self.model.total_payout(self.now())
    }

    pub fn accrued_interest(&self) -> Money {
        self.model.accrued_interest(self.now())
    }

    /// all figures at once
    pub fn compute_all(&mut self) -> LoanResult {
        let now = self.now();
        let result = self.model.compute_all(now);

        self.events.emit(Event::CalculationCompleted {
            calculation_id: self.id,
            result: result.clone(),
            timestamp: now,
        });

        result
    }

    /// month-by-month breakdown
    pub fn schedule(&mut self) -> PaymentSchedule {
        let now = self.now();
        let schedule = self.model.schedule(now);

        self.events.emit(Event::ScheduleGenerated {
            calculation_id: self.id,
            payment_type: schedule.payment_type,
            payment_count: schedule.len() as u32,
            total_payment: schedule.total_payment,
            timestamp: now,
        });

        schedule
    }

    /// serializable view of the parameters and figures
    pub fn report(&mut self, include_schedule: bool) -> LoanReport {
        let result = self.compute_all();
        let schedule = if include_schedule {
            Some(self.schedule())
        } else {
            None
        };

        LoanReport::new(self.id, self.parameters.clone(), result, schedule)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn now(&self) -> DateTime<Utc> {
        match self.time {
            Some(time) => time.now(),
            None => SafeTimeProvider::new(TimeSource::System).now(),
        }
    }
}

impl fmt::Debug for LoanCalculator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoanCalculator")
            .field("id", &self.id)
            .field("parameters", &self.parameters)
            .field("payment_type", &self.payment_type())
            .field("pinned_time", &self.time.is_some())
            .finish()
    }
}

/// builder for loan calculators
#[derive(Default)]
pub struct LoanCalculatorBuilder<'t> {
    config: CalculatorConfig,
    raw_input: Option<String>,
    parameters: Option<LoanParameters>,
    payment_type: Option<PaymentType>,
    payment_type_name: Option<String>,
    time: Option<&'t SafeTimeProvider>,
}

impl<'t> LoanCalculatorBuilder<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    /// loan description text, parsed on build
    pub fn input(mut self, raw_input: &str) -> Self {
        self.raw_input = Some(raw_input.to_string());
        self
    }

    pub fn parameters(mut self, parameters: LoanParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = Some(payment_type);
        self
    }

    /// payment type by name, resolved on build
    pub fn payment_type_name(mut self, name: &str) -> Self {
        self.payment_type_name = Some(name.to_string());
        self
    }

    pub fn set_time(mut self, time: &'t SafeTimeProvider) -> Self {
        self.time = Some(time);
        self
    }

    pub fn build(self) -> Result<LoanCalculator<'t>> {
        self.config.validate()?;

        let (parameters, raw_input) = match (self.raw_input, self.parameters) {
            (Some(raw), _) => (InputParser::new(self.config.parser.clone()).parse(&raw)?, Some(raw)),
            (None, Some(parameters)) => (parameters, None),
            (None, None) => {
                return Err(CalculatorError::InvalidParameters {
                    message: "no loan description or parameters supplied".to_string(),
                })
            }
        };

        let payment_type = resolve_payment_type(
            self.payment_type,
            self.payment_type_name.as_deref(),
            &self.config,
        )?;

        let mut calculator = LoanCalculator::new(parameters, payment_type)?;
        calculator.time = self.time;

        if let Some(raw_input) = raw_input {
            let timestamp = calculator.now();
            calculator.events.emit(Event::InputParsed {
                calculation_id: calculator.id,
                raw_input,
                parameters: calculator.parameters.clone(),
                timestamp,
            });
        }

        Ok(calculator)
    }
}

fn resolve_payment_type(
    payment_type: Option<PaymentType>,
    name: Option<&str>,
    config: &CalculatorConfig,
) -> Result<PaymentType> {
    match (payment_type, name) {
        (Some(payment_type), _) => Ok(payment_type),
        (None, Some(name)) => name.parse(),
        (None, None) => Ok(config.default_payment_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseError;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    const ANNUITY_INPUT: &str = "amount: 150000\ninterest: 2.9%\ndownpayment: 0\nterm: 4\n";
    const DIFFERENTIATED_INPUT: &str = "amount: 111000\ninterest: 9.9%\ndownpayment: 11000\nterm: 12\n";

    fn clock(year: i32, month: u32, day: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
        ))
    }

    fn money(value: rust_decimal::Decimal) -> Money {
        Money::from_decimal(value)
    }

    #[test]
    fn test_create_from_input() {
        let calc = LoanCalculator::from_input(
            "amount: 232000\ninterest: 3.7%\ndownpayment: 5000\nterm: 15\n",
            "dif",
        )
        .unwrap();

        let params = calc.parameters();
        assert_eq!(params.amount(), Money::from_major(232_000));
        assert_eq!(params.interest().as_percentage(), dec!(3.7));
        assert_eq!(params.downpayment(), Money::from_major(5_000));
        assert_eq!(params.term(), 15);
        assert_eq!(calc.payment_type(), PaymentType::Differentiated);
    }

    #[test]
    fn test_annuity_figures() {
        let calc = LoanCalculator::from_input(ANNUITY_INPUT, "annuity").unwrap();

        assert_eq!(calc.monthly_payment(), money(dec!(3313.52)));
        assert_eq!(calc.total_payout(), money(dec!(159048.96)));
        assert_eq!(calc.accrued_interest(), money(dec!(9048.96)));
    }

    #[test]
    fn test_differentiated_monthly_payment() {
        let time = clock(2023, 10, 18);
        let mut calc = LoanCalculator::from_input(DIFFERENTIATED_INPUT, "dif").unwrap();
        calc.set_time(&time);

        assert_eq!(calc.monthly_payment(), money(dec!(1535.27)));
    }

    #[test]
    fn test_differentiated_total_payout() {
        let time = clock(2023, 11, 2);
        let calc = LoanCalculator::builder()
            .input(DIFFERENTIATED_INPUT)
            .payment_type(PaymentType::Differentiated)
            .set_time(&time)
            .build()
            .unwrap();

        assert_eq!(calc.total_payout(), money(dec!(159806.84)));
    }

    #[test]
    fn test_amount_of_accrued_interest() {
        let time = clock(2023, 11, 20);
        let calc = LoanCalculator::builder()
            .input("amount: 100000\ninterest: 5.5%\ndownpayment: 20000\nterm: 30\n")
            .payment_type_name("differentiated")
            .set_time(&time)
            .build()
            .unwrap();

        assert_eq!(calc.accrued_interest(), money(dec!(66180.76)));
    }

    #[test]
    fn test_compute_all() {
        let mut calc = LoanCalculator::from_input(
            "amount: 100000\ninterest: 5.5%\ndownpayment: 20000\nterm: 1\n",
            "ann",
        )
        .unwrap();

        let result = calc.compute_all();
        assert_eq!(result.payment_type, PaymentType::Annuity);
        assert_eq!(result.monthly_payment, money(dec!(6866.94)));
        assert_eq!(result.total_payout, money(dec!(82403.28)));
        assert_eq!(result.amount_of_accrued_interest, money(dec!(2403.28)));
    }

    #[test]
    fn test_results_are_recomputed_with_the_clock() {
        let time = clock(2023, 10, 31);
        let mut calc = LoanCalculator::from_input(DIFFERENTIATED_INPUT, "dif").unwrap();
        calc.set_time(&time);

        let control = time.test_control().unwrap();

        let october = calc.compute_all();
        control.advance(chrono::Duration::days(1));
        let november = calc.compute_all();

        assert_eq!(october.monthly_payment, money(dec!(1535.27)));
        assert_eq!(october.total_payout, money(dec!(159795.54)));
        assert_eq!(november.monthly_payment, money(dec!(1508.14)));
        assert_eq!(november.total_payout, money(dec!(159806.84)));
    }

    #[test]
    fn test_invalid_payment_type() {
        let err = LoanCalculator::from_input(ANNUITY_INPUT, "balloon").unwrap_err();
        assert_eq!(
            err,
            CalculatorError::InvalidPaymentType {
                value: "balloon".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors_surface() {
        let err = LoanCalculator::from_input("amount: 1\n", "ann").unwrap_err();
        assert_eq!(err, CalculatorError::Parse(ParseError::WrongFieldCount { expected: 4, found: 1 }));
    }

    #[test]
    fn test_degenerate_parameters_are_rejected() {
        let err = LoanCalculator::from_input(
            "amount: 10000\ninterest: 5%\ndownpayment: 10000\nterm: 3\n",
            "ann",
        )
        .unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidParameters { .. }));

        let err = LoanCalculator::from_input(
            "amount: 10000\ninterest: 5%\ndownpayment: 0\nterm: 0\n",
            "dif",
        )
        .unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidParameters { .. }));
    }

    #[test]
    fn test_default_payment_type_from_config() {
        let calc = LoanCalculator::builder().input(ANNUITY_INPUT).build().unwrap();
        assert_eq!(calc.payment_type(), PaymentType::Annuity);

        let config = CalculatorConfig {
            default_payment_type: PaymentType::Differentiated,
            ..CalculatorConfig::default()
        };
        let calc = LoanCalculator::builder()
            .config(config)
            .input(ANNUITY_INPUT)
            .build()
            .unwrap();
        assert_eq!(calc.payment_type(), PaymentType::Differentiated);
    }

    #[test]
    fn test_builder_requires_input_or_parameters() {
        let err = LoanCalculator::builder().build().unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidParameters { .. }));
    }

    #[test]
    fn test_audit_events() {
        let time = clock(2023, 11, 2);
        let mut calc = LoanCalculator::builder()
            .input(ANNUITY_INPUT)
            .set_time(&time)
            .build()
            .unwrap();

        assert_eq!(calc.events().len(), 1);
        match &calc.events()[0] {
            Event::InputParsed { raw_input, parameters, timestamp, .. } => {
                assert_eq!(raw_input, ANNUITY_INPUT);
                assert_eq!(parameters, calc.parameters());
                assert_eq!(*timestamp, time.now());
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let result = calc.compute_all();
        let events = calc.take_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.calculation_id() == calc.id()));
        assert_eq!(
            events[1],
            Event::CalculationCompleted {
                calculation_id: calc.id(),
                result,
                timestamp: time.now(),
            }
        );
        assert!(calc.events().is_empty());
    }

    #[test]
    fn test_figures_alone_do_not_emit() {
        let mut calc = LoanCalculator::new(
            LoanParameters::new(
                Money::from_major(12_000),
                crate::decimal::Rate::from_percentage(dec!(12)),
                Money::ZERO,
                1,
            ),
            PaymentType::Annuity,
        )
        .unwrap();

        calc.monthly_payment();
        calc.total_payout();
        calc.accrued_interest();
        assert!(calc.events().is_empty());

        let schedule = calc.schedule();
        assert_eq!(schedule.len(), 12);
        assert!(matches!(calc.events()[0], Event::ScheduleGenerated { payment_count: 12, .. }));
    }
}
