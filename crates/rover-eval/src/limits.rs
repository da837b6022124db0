//! Sandbox ceilings and pacing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default ceiling on capability invocations per run.
pub const MAX_OPERATIONS: u32 = 5_000;
/// Default ceiling on iterations of a single `while` loop.
pub const MAX_WHILE_ITERATIONS: u32 = 1_000;
/// Default ceiling on `for`/`while` nesting depth.
pub const MAX_NESTED_BLOCKS: u32 = 10;
/// Default pacing delay after each movement/turn command, in milliseconds.
pub const PACING_DELAY_MS: u64 = 150;

/// Resource limits for one script run.
///
/// The ceilings substitute for static termination guarantees and wall-clock
/// timeouts, which the language does not have. Violating any of them is a
/// fatal runtime error. Hosts can deserialize a custom profile from
/// configuration; [`Limits::default`] gives the stock values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Capability invocations allowed per run.
    pub max_operations: u32,
    /// Iterations allowed for each `while` loop.
    pub max_while_iterations: u32,
    /// Allowed `for`/`while` nesting depth.
    pub max_nested_blocks: u32,
    /// Suspension after each movement/turn command, in milliseconds.
    pub pacing_delay_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_operations: MAX_OPERATIONS,
            max_while_iterations: MAX_WHILE_ITERATIONS,
            max_nested_blocks: MAX_NESTED_BLOCKS,
            pacing_delay_ms: PACING_DELAY_MS,
        }
    }
}

impl Limits {
    /// The pacing delay as a [`Duration`].
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}
