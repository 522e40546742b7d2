use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{CalculationId, LoanParameters, LoanResult, PaymentType};

/// audit events emitted by a calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    InputParsed {
        calculation_id: CalculationId,
        raw_input: String,
        parameters: LoanParameters,
        timestamp: DateTime<Utc>,
    },
    ScheduleGenerated {
        calculation_id: CalculationId,
        payment_type: PaymentType,
        payment_count: u32,
        total_payment: Money,
        timestamp: DateTime<Utc>,
    },
    CalculationCompleted {
        calculation_id: CalculationId,
        result: LoanResult,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn calculation_id(&self) -> CalculationId {
        match self {
            Event::InputParsed { calculation_id, .. }
            | Event::ScheduleGenerated { calculation_id, .. }
            | Event::CalculationCompleted { calculation_id, .. } => *calculation_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::InputParsed { timestamp, .. }
            | Event::ScheduleGenerated { timestamp, .. }
            | Event::CalculationCompleted { timestamp, .. } => *timestamp,
        }
    }

    /// one json object per event, for appending to an audit log
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
