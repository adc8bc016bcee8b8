/// Operator -> simulated execution time
///
/// Purely advisory: the value travels with each dispatched task so agents can
/// throttle themselves. It never influences scheduling order.

use crate::calculation::Operator;
use crate::config::OperationTimes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPolicy {
    times: OperationTimes,
}

impl DurationPolicy {
    pub fn new(times: OperationTimes) -> Self {
        Self { times }
    }

    /// Milliseconds an agent should spend on `operator`
    pub fn duration_for(&self, operator: Operator) -> u64 {
        match operator {
            Operator::Add => self.times.addition_ms,
            Operator::Sub => self.times.subtraction_ms,
            Operator::Mul => self.times.multiplication_ms,
            Operator::Div => self.times.division_ms,
        }
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::new(OperationTimes::default())
    }
}
