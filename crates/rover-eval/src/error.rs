//! Runtime error types for the RoverScript evaluator.

use thiserror::Error;

/// A fatal runtime error.
///
/// There is no per-statement runtime recovery: the first error at any depth
/// aborts the entire run and propagates to the caller. Side effects already
/// performed stay in effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Name not found in the variable store or the injected globals.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    /// Bare call to a name that is not a callable global.
    #[error("undefined function: {0}")]
    UndefinedFunction(String),
    /// Attribute read the capability does not expose.
    #[error("bot has no attribute '{0}'")]
    UnknownAttribute(String),
    /// Method call the capability does not expose.
    #[error("bot has no method '{0}'")]
    UnknownMethod(String),
    /// Operator applied to operands of the wrong kind.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// Division by zero, integer overflow.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    /// `range` invoked with the wrong number of arguments.
    #[error("range() takes 1-3 arguments")]
    RangeArity,
    /// Capability-invocation ceiling tripped.
    #[error("maximum operations limit exceeded ({0}); code may be too complex or contain infinite loops")]
    OperationLimit(u32),
    /// Single-`while`-loop iteration ceiling tripped.
    #[error("while loop exceeded maximum iterations ({0})")]
    WhileIterationLimit(u32),
    /// `for`/`while` nesting ceiling tripped.
    #[error("maximum nesting depth exceeded ({0}); code structure is too deeply nested")]
    NestingLimit(u32),
    /// The host raised the cooperative stop flag.
    #[error("execution stopped by host")]
    Stopped,
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, RuntimeError>;
