//! RoverScript tree-walking evaluator.
//!
//! Executes a parsed statement list against a host-supplied
//! [`BotCapability`], enforcing the sandbox ceilings (operations,
//! while-iterations, nesting depth) and pacing each effectful capability
//! command through a host-supplied [`Pacer`].

mod bot;
mod env;
mod error;
mod evaluator;
mod limits;
mod pacer;
mod value;

pub use bot::{BotCapability, Direction};
pub use env::Environment;
pub use error::{EvalResult, RuntimeError};
pub use evaluator::{CancelFlag, Evaluator};
pub use limits::Limits;
pub use pacer::{BlockingPacer, NoPacing, Pacer};
pub use value::Value;
