//! Runner: applies procedures under cells and checks the round trip
//!
//! ## Options
//!
//! | Preset | Rounds | Round trip |
//! |--------|--------|------------|
//! | `RunOptions::default()` | 2 | verified |
//! | `RunOptions::single()` | 1 | not verified |
//! | `RunOptions::soak(n)` | n | verified |

use crate::catalog::{Exchange, FibCopy, MatrixApply, Reverse, SwapHeads, SwapLists, XorMask};
use crate::error::{ProcedureError, Result};
use crate::procedure::Procedure;
use crate::value::Binding;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// How a procedure is run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Number of times the procedure is applied to the same state
    pub rounds: u32,
    /// Require the state to equal the initial state after all rounds
    pub verify_round_trip: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            rounds: 2,
            verify_round_trip: true,
        }
    }
}

impl RunOptions {
    /// One forward application, no round-trip check
    pub fn single() -> Self {
        RunOptions {
            rounds: 1,
            verify_round_trip: false,
        }
    }

    /// `rounds` applications with the round-trip check
    pub fn soak(rounds: u32) -> Self {
        RunOptions {
            rounds,
            verify_round_trip: true,
        }
    }

    /// Builder: set the number of rounds
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Builder: enable or disable the round-trip check
    pub fn with_round_trip(mut self, verify: bool) -> Self {
        self.verify_round_trip = verify;
        self
    }

    /// Reject option combinations that cannot be run
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(ProcedureError::invalid_options("rounds must be at least 1"));
        }
        if self.verify_round_trip && self.rounds % 2 != 0 {
            return Err(ProcedureError::invalid_options(format!(
                "round-trip check needs an even number of rounds, got {}",
                self.rounds
            )));
        }
        Ok(())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Unique id of this run, also attached to its log span
    pub run_id: Uuid,
    /// Procedure name
    pub procedure: String,
    /// Applications performed
    pub rounds: u32,
    /// Cell steps over all rounds
    pub steps: u64,
    /// Variables before the first application
    pub before: Vec<Binding>,
    /// Variables after the first application
    pub after: Vec<Binding>,
}

impl RunReport {
    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{}: {} round(s), {} step(s), run {}",
            self.procedure, self.rounds, self.steps, self.run_id
        )
    }
}

/// Type-erased view of a [`Procedure`], so the catalog can hold them all
pub trait Check {
    /// Catalog name
    fn name(&self) -> &'static str;

    /// One-line description
    fn summary(&self) -> &'static str;

    /// Run from a fresh initial state
    fn run(&self, options: &RunOptions) -> Result<RunReport>;
}

impl<P: Procedure> Check for P {
    fn name(&self) -> &'static str {
        P::NAME
    }

    fn summary(&self) -> &'static str {
        P::SUMMARY
    }

    fn run(&self, options: &RunOptions) -> Result<RunReport> {
        run(self, options)
    }
}

/// Run `procedure` according to `options`
pub fn run<P: Procedure>(procedure: &P, options: &RunOptions) -> Result<RunReport> {
    options.validate()?;

    let run_id = Uuid::new_v4();
    let span = info_span!("run", %run_id, procedure = P::NAME);
    let _guard = span.enter();

    let initial = procedure.initial();
    let state = initial.clone();
    let before = procedure.bindings(&state);
    let mut after = Vec::new();
    let mut steps = 0u64;

    for round in 0..options.rounds {
        let taken = procedure.apply(&state).map_err(|e| {
            warn!(round, error = %e, "round failed");
            e
        })?;
        debug!(round, steps = taken, "round complete");
        steps += taken;
        if round == 0 {
            after = procedure.bindings(&state);
        }
    }

    if options.verify_round_trip && state != initial {
        warn!(rounds = options.rounds, "state not restored");
        return Err(ProcedureError::NotRestored {
            procedure: P::NAME.to_string(),
            rounds: options.rounds,
        });
    }

    info!(rounds = options.rounds, steps, "run passed");
    Ok(RunReport {
        run_id,
        procedure: P::NAME.to_string(),
        rounds: options.rounds,
        steps,
        before,
        after,
    })
}

/// Every procedure, in display order
pub fn catalog() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(Exchange),
        Box::new(Reverse),
        Box::new(XorMask),
        Box::new(FibCopy),
        Box::new(SwapLists),
        Box::new(SwapHeads),
        Box::new(MatrixApply::standard()),
    ]
}

/// Look up a procedure by name
pub fn find(name: &str) -> Result<Box<dyn Check>> {
    catalog()
        .into_iter()
        .find(|check| check.name() == name)
        .ok_or_else(|| ProcedureError::UnknownProcedure {
            name: name.to_string(),
        })
}
