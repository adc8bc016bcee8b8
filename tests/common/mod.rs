#![allow(dead_code)]

use std::sync::Once;

use distcalc::orchestrator::{ExpressionId, SchedulerState, Task};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Logs are captured per test and only shown for failures (or with
/// `-- --nocapture`). Enable levels with e.g. `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Compute a dispatched task the way an agent would.
pub fn compute(task: &Task) -> f64 {
    let (a, b) = (task.arg1.expect("arg1 known"), task.arg2.expect("arg2 known"));
    task.operation.apply(a, b).expect("computable task")
}

/// Dispatch and complete tasks until the ready queue is empty.
///
/// Returns the IDs of every dispatched task, in dispatch order.
pub fn drain(state: &mut SchedulerState) -> Vec<u64> {
    let mut dispatched = Vec::new();
    while let Some(task) = state.dispatch() {
        dispatched.push(task.id);
        state.complete(task.id, compute(&task)).expect("completion accepted");
    }
    dispatched
}

/// Compile one expression and run it to the end.
pub fn run_expression(source: &str) -> (SchedulerState, ExpressionId) {
    let mut state = SchedulerState::default();
    let id = state.compile(source).expect("expression compiles");
    drain(&mut state);
    (state, id)
}
