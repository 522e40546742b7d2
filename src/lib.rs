pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod parser;
pub mod payments;
pub mod report;
pub mod types;

// re-export key types
pub use calculator::{LoanCalculator, LoanCalculatorBuilder};
pub use config::{CalculatorConfig, ParserConfig};
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, ParseError, Result};
pub use events::{Event, EventStore};
pub use parser::InputParser;
pub use payments::{
    AnnuityPayment, DifferentiatedPayment, LoanTerms, PaymentModel, PaymentSchedule,
    ScheduledPayment,
};
pub use report::LoanReport;
pub use types::{CalculationId, Field, LoanParameters, LoanResult, PaymentType};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
