//! Reversibility Test Suite
//!
//! Drives procedures through the facade and checks the two halves of the
//! contract:
//!
//! 1. Correct procedures restore their state after an even number of rounds
//! 2. Procedures that break the linear-usage discipline are rejected with the
//!    violation that names the offending cell
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test reversibility
//! cargo test --test reversibility broken::
//! ```

use revcheck::prelude::*;
use std::cell::RefCell;

// Test modules
pub mod broken;
pub mod catalog_runs;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Two scalars and a list, for hand-written procedures
#[derive(Debug, Clone, PartialEq)]
pub struct Vars {
    /// First scalar
    pub x: RefCell<i64>,
    /// Second scalar
    pub y: RefCell<i64>,
    /// A list
    pub l: RefCell<Vec<i64>>,
}

impl Vars {
    /// Standard starting values
    pub fn new() -> Self {
        Vars {
            x: RefCell::new(3),
            y: RefCell::new(4),
            l: RefCell::new(vec![1, 2, 3]),
        }
    }
}

impl Default for Vars {
    fn default() -> Self {
        Vars::new()
    }
}

/// Run `body` under a group holding cells for every variable in `vars`
pub fn with_cells<F>(vars: &Vars, body: F) -> revcheck::Result<u64>
where
    F: FnOnce(&CellGroup<'_>, &ScalarCell<&RefCell<i64>>, &ScalarCell<&RefCell<i64>>, &ContainerCell<'_, Vec<i64>>) -> revcheck::Result<()>,
{
    let x_ = ScalarCell::new("x", &vars.x);
    let y_ = ScalarCell::new("y", &vars.y);
    let l_ = ContainerCell::new("l", &vars.l);
    let mut cells = CellGroup::new("main");
    cells.push(&x_);
    cells.push(&y_);
    cells.push(&l_);
    body(&cells, &x_, &y_, &l_)?;
    Ok(cells.steps())
}
