//! RoverScript runtime: orchestrates the full interpretation pipeline.
//!
//! ```text
//! source text → Lexer → Parser → Evaluator (bot capability + pacer)
//! ```
//!
//! Hosts embed a [`ScriptEngine`], hand it their capability object and a
//! pacing hook, and get back either a [`RunSummary`] or the run's single
//! fatal error. Syntax errors never fail a run: the parser drops malformed
//! statements and the recovered remainder still executes, matching the
//! editor product's behavior.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use rover_lexer::tokenize;
use rover_parser::Parser;
use rover_types::ast::Stmt;

pub use rover_eval::{
    BlockingPacer, BotCapability, CancelFlag, Direction, Evaluator, Limits, NoPacing, Pacer,
    RuntimeError, Value,
};
pub use rover_types::SyntaxError;

/// Compile a script: tokenize and parse with statement-level recovery.
///
/// Returns the recovered statements together with the diagnostics for the
/// statements that were dropped. Never fails.
pub fn compile(source: &str) -> (Vec<Stmt>, Vec<SyntaxError>) {
    let outcome = Parser::new(tokenize(source)).parse();
    (outcome.statements, outcome.errors)
}

/// A failed script run.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Fatal evaluator error — the single wrap point between the evaluator
    /// and the host-facing surface.
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Outcome of a completed run, serializable for the host UI.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Statements executed (after parser recovery).
    pub statements: usize,
    /// Diagnostics for statements dropped during parsing.
    pub syntax_errors: Vec<SyntaxError>,
    /// Capability invocations performed.
    pub operations: u32,
}

/// Embedding surface for one host.
///
/// Holds the limits profile and an optional cooperative stop flag; each
/// [`run`](ScriptEngine::run) constructs a fresh evaluator, so no state
/// leaks between script runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptEngine {
    limits: Limits,
    cancel: Option<CancelFlag>,
}

impl ScriptEngine {
    /// Engine with the default limits profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the limits profile.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Attach a stop flag; the host raises it to end a run at the next
    /// statement boundary.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Compile and execute a script against the given capability object.
    pub fn run(
        &self,
        source: &str,
        bot: &mut dyn BotCapability,
        pacer: &mut dyn Pacer,
    ) -> Result<RunSummary, ScriptError> {
        let (statements, syntax_errors) = compile(source);
        if !syntax_errors.is_empty() {
            warn!(
                dropped = syntax_errors.len(),
                "recovered from syntax errors; malformed statements were dropped"
            );
        }
        debug!(statements = statements.len(), "executing script");

        let mut evaluator = Evaluator::with_limits(bot, pacer, self.limits.clone());
        if let Some(flag) = &self.cancel {
            evaluator = evaluator.with_cancel_flag(flag.clone());
        }
        evaluator.execute(&statements)?;

        Ok(RunSummary {
            statements: statements.len(),
            syntax_errors,
            operations: evaluator.operation_count(),
        })
    }
}
