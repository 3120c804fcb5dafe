use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::settings::CalculatorId;

/// A single calculator invocation, as reported to the analytics collector.
/// Inputs and result are carried as JSON so the sink never needs to know
/// calculator-specific types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEvent {
    pub calculator: CalculatorId,
    pub inputs: Value,
    pub result: Value,
}

impl UsageEvent {
    pub fn new(
        calculator: CalculatorId,
        inputs: &impl Serialize,
        result: &impl Serialize,
    ) -> Self {
        UsageEvent {
            calculator,
            inputs: serde_json::to_value(inputs).unwrap_or_default(),
            result: serde_json::to_value(result).unwrap_or_default(),
        }
    }
}

/// Fire-and-forget event sink. No delivery guarantee: `record` returns
/// nothing and implementations must swallow their own failures, so a dead
/// collector can never affect a calculation.
pub trait UsageSink {
    fn record(&self, event: UsageEvent);
}

/// Discards every event. The default when no collector is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl UsageSink for NullSink {
    fn record(&self, _event: UsageEvent) {}
}
