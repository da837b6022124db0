//! Core statement and expression evaluator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rover_types::ast::{BinOp, Expr, Stmt, UnaryOp};
use tracing::{debug, trace};

use crate::bot::BotCapability;
use crate::env::Environment;
use crate::error::{EvalResult, RuntimeError};
use crate::limits::Limits;
use crate::pacer::Pacer;
use crate::value::Value;

/// Cooperative stop flag shared between a host and one evaluator.
///
/// The evaluator checks it once per statement; a pacing delay already
/// entered runs to completion before the stop takes effect.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the run stop at the next statement boundary.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The RoverScript evaluator.
///
/// Walks a parsed statement list against a flat variable environment and
/// the injected capability object, enforcing the sandbox ceilings. One
/// evaluator is constructed per script run and owns its variable store and
/// counters exclusively for the run's duration.
pub struct Evaluator<'host> {
    /// The injected capability object — the only route to host effects.
    bot: &'host mut dyn BotCapability,
    /// Pacing hook invoked after each movement/turn command.
    pacer: &'host mut dyn Pacer,
    /// Sandbox ceilings and pacing delay.
    limits: Limits,
    /// Optional host stop flag, checked once per statement.
    cancel: Option<CancelFlag>,
    /// Flat variable store, shared across nested blocks and loop iterations.
    env: Environment,
    /// Capability invocations so far this run.
    operation_count: u32,
    /// Current `for`/`while` nesting depth.
    nested_blocks: u32,
}

impl<'host> Evaluator<'host> {
    /// Create an evaluator with the default [`Limits`].
    pub fn new(bot: &'host mut dyn BotCapability, pacer: &'host mut dyn Pacer) -> Self {
        Self::with_limits(bot, pacer, Limits::default())
    }

    /// Create an evaluator with a custom limits profile.
    pub fn with_limits(
        bot: &'host mut dyn BotCapability,
        pacer: &'host mut dyn Pacer,
        limits: Limits,
    ) -> Self {
        Self {
            bot,
            pacer,
            limits,
            cancel: None,
            env: Environment::new(),
            operation_count: 0,
            nested_blocks: 0,
        }
    }

    /// Attach a cooperative stop flag.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The variable store. Useful for host inspection after a run.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Capability invocations performed so far.
    pub fn operation_count(&self) -> u32 {
        self.operation_count
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statement execution
    // ══════════════════════════════════════════════════════════════════════

    /// Execute a program: reset the counters, then run statements strictly
    /// in order. The first error at any depth aborts the entire run; side
    /// effects already performed remain in effect.
    pub fn execute(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        self.operation_count = 0;
        self.nested_blocks = 0;
        debug!(statements = statements.len(), "script run started");

        for statement in statements {
            self.execute_statement(statement)?;
        }

        debug!(operations = self.operation_count, "script run finished");
        Ok(())
    }

    fn execute_statement(&mut self, statement: &Stmt) -> EvalResult<()> {
        if let Some(flag) = &self.cancel {
            if flag.is_stopped() {
                return Err(RuntimeError::Stopped);
            }
        }

        match statement {
            Stmt::Expression(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }
            Stmt::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.define(name, value);
                Ok(())
            }
            Stmt::If {
                condition,
                then_body,
                elif_branches,
                else_body,
            } => self.exec_if(condition, then_body, elif_branches, else_body.as_deref()),
            Stmt::For {
                variable,
                range_args,
                body,
            } => self.exec_for(variable, range_args, body),
            Stmt::While { condition, body } => self.exec_while(condition, body),
            Stmt::Pass => Ok(()),
        }
    }

    fn exec_block(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    /// Branches are tried strictly in source order; at most one body runs.
    fn exec_if(
        &mut self,
        condition: &Expr,
        then_body: &[Stmt],
        elif_branches: &[(Expr, Vec<Stmt>)],
        else_body: Option<&[Stmt]>,
    ) -> EvalResult<()> {
        if self.eval_expr(condition)?.is_truthy() {
            return self.exec_block(then_body);
        }
        for (elif_condition, elif_body) in elif_branches {
            if self.eval_expr(elif_condition)?.is_truthy() {
                return self.exec_block(elif_body);
            }
        }
        if let Some(body) = else_body {
            return self.exec_block(body);
        }
        Ok(())
    }

    fn exec_for(&mut self, variable: &str, range_args: &[Expr], body: &[Stmt]) -> EvalResult<()> {
        self.nested_blocks += 1;
        let result = self.run_for(variable, range_args, body);
        // depth unwinds on every exit, an error raised in the body included,
        // so surrounding loops keep an accurate count; the error propagates
        self.nested_blocks -= 1;
        result
    }

    fn run_for(&mut self, variable: &str, range_args: &[Expr], body: &[Stmt]) -> EvalResult<()> {
        self.check_nesting()?;

        if range_args.is_empty() || range_args.len() > 3 {
            return Err(RuntimeError::RangeArity);
        }
        let mut values = Vec::with_capacity(range_args.len());
        for arg in range_args {
            values.push(self.expect_range_int(arg)?);
        }
        let (start, stop, step) = match values[..] {
            [stop] => (0, stop, 1),
            [start, stop] => (start, stop, 1),
            [start, stop, step] => (start, stop, step),
            _ => unreachable!("arity checked above"),
        };

        for value in build_range(start, stop, step) {
            self.env.define(variable, Value::Int(value));
            self.exec_block(body)?;
        }
        Ok(())
    }

    fn exec_while(&mut self, condition: &Expr, body: &[Stmt]) -> EvalResult<()> {
        self.nested_blocks += 1;
        let result = self.run_while(condition, body);
        self.nested_blocks -= 1;
        result
    }

    fn run_while(&mut self, condition: &Expr, body: &[Stmt]) -> EvalResult<()> {
        self.check_nesting()?;

        let mut iterations: u32 = 0;
        while self.eval_expr(condition)?.is_truthy() {
            if iterations > self.limits.max_while_iterations {
                return Err(RuntimeError::WhileIterationLimit(
                    self.limits.max_while_iterations,
                ));
            }
            iterations += 1;
            self.exec_block(body)?;
        }
        Ok(())
    }

    fn check_nesting(&self) -> EvalResult<()> {
        if self.nested_blocks > self.limits.max_nested_blocks {
            Err(RuntimeError::NestingLimit(self.limits.max_nested_blocks))
        } else {
            Ok(())
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Int(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Variable(name) => self.eval_variable(name),
            Expr::Unary { op, operand } => self.eval_unary(*op, operand),
            Expr::Binary { left, op, right } => self.eval_binary(left, *op, right),
            Expr::Call { name, args } => self.eval_call(name, args),
            Expr::Attribute { object, name } => self.eval_attribute(object, name),
            Expr::MethodCall {
                object,
                method,
                args,
            } => self.eval_method_call(object, method, args),
        }
    }

    /// Variable lookup: the mutable store first, then the injected globals.
    fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }
        // `range` is a keyword at the lexical level, so `bot` is the only
        // global reachable by name
        if name == "bot" {
            return Ok(Value::Bot);
        }
        Err(RuntimeError::UndefinedVariable(name.to_string()))
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expr) -> EvalResult<Value> {
        let value = self.eval_expr(operand)?;
        match op {
            UnaryOp::Neg => match value {
                Value::Int(n) => n
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| RuntimeError::Arithmetic("integer overflow in '-'".into())),
                other => Err(RuntimeError::TypeMismatch(format!(
                    "cannot negate {}",
                    other.type_name()
                ))),
            },
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }

    fn eval_binary(&mut self, left: &Expr, op: BinOp, right: &Expr) -> EvalResult<Value> {
        // Both operands evaluate before the operator applies — `and`/`or`
        // included: the language does not short-circuit.
        let lv = self.eval_expr(left)?;
        let rv = self.eval_expr(right)?;

        match op {
            BinOp::Add => self.eval_arith(&lv, &rv, op, i64::checked_add),
            BinOp::Sub => self.eval_arith(&lv, &rv, op, i64::checked_sub),
            BinOp::Mul => self.eval_arith(&lv, &rv, op, i64::checked_mul),
            BinOp::FloorDiv => self.eval_floor_div(&lv, &rv),
            BinOp::Mod => self.eval_mod(&lv, &rv),
            BinOp::Gt | BinOp::Ge | BinOp::Lt | BinOp::Le => {
                self.eval_comparison(&lv, &rv, op)
            }
            BinOp::Eq => Ok(Value::Bool(lv == rv)),
            BinOp::NotEq => Ok(Value::Bool(lv != rv)),
            BinOp::And => Ok(Value::Bool(lv.is_truthy() && rv.is_truthy())),
            BinOp::Or => Ok(Value::Bool(lv.is_truthy() || rv.is_truthy())),
        }
    }

    fn eval_arith(
        &self,
        lv: &Value,
        rv: &Value,
        op: BinOp,
        apply: fn(i64, i64) -> Option<i64>,
    ) -> EvalResult<Value> {
        if let (Value::Int(a), Value::Int(b)) = (lv, rv) {
            apply(*a, *b)
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::Arithmetic(format!("integer overflow in '{op}'")))
        } else {
            Err(RuntimeError::TypeMismatch(format!(
                "cannot apply '{op}' to {} and {}",
                lv.type_name(),
                rv.type_name()
            )))
        }
    }

    /// `//` floors toward negative infinity: `(-7) // 2 == -4`.
    fn eval_floor_div(&self, lv: &Value, rv: &Value) -> EvalResult<Value> {
        if let (Value::Int(a), Value::Int(b)) = (lv, rv) {
            if *b == 0 {
                return Err(RuntimeError::Arithmetic("division by zero".into()));
            }
            let q = a
                .checked_div(*b)
                .ok_or_else(|| RuntimeError::Arithmetic("integer overflow in '//'".into()))?;
            let r = a % b;
            if r != 0 && (*a < 0) != (*b < 0) {
                Ok(Value::Int(q - 1))
            } else {
                Ok(Value::Int(q))
            }
        } else {
            Err(RuntimeError::TypeMismatch(format!(
                "cannot apply '//' to {} and {}",
                lv.type_name(),
                rv.type_name()
            )))
        }
    }

    /// `%` is the host's truncating remainder: `(-7) % 2 == -1`, not
    /// floor-based modulo.
    fn eval_mod(&self, lv: &Value, rv: &Value) -> EvalResult<Value> {
        if let (Value::Int(a), Value::Int(b)) = (lv, rv) {
            if *b == 0 {
                return Err(RuntimeError::Arithmetic("modulo by zero".into()));
            }
            a.checked_rem(*b)
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::Arithmetic("integer overflow in '%'".into()))
        } else {
            Err(RuntimeError::TypeMismatch(format!(
                "cannot apply '%' to {} and {}",
                lv.type_name(),
                rv.type_name()
            )))
        }
    }

    /// Ordering comparisons: numeric for ints, lexicographic for strings,
    /// never across kinds.
    fn eval_comparison(&self, lv: &Value, rv: &Value, op: BinOp) -> EvalResult<Value> {
        use std::cmp::Ordering;

        let ord = match (lv, rv) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => {
                return Err(RuntimeError::TypeMismatch(format!(
                    "cannot compare {} and {}",
                    lv.type_name(),
                    rv.type_name()
                )));
            }
        };
        let result = match op {
            BinOp::Gt => ord == Ordering::Greater,
            BinOp::Ge => ord != Ordering::Less,
            BinOp::Lt => ord == Ordering::Less,
            BinOp::Le => ord != Ordering::Greater,
            _ => unreachable!("non-ordering operator"),
        };
        Ok(Value::Bool(result))
    }

    /// Bare calls: arguments evaluate left-to-right before the callee is
    /// resolved. No global is callable by bare name (`range` lexes as a
    /// keyword), so resolution always fails.
    fn eval_call(&mut self, name: &str, args: &[Expr]) -> EvalResult<Value> {
        for arg in args {
            self.eval_expr(arg)?;
        }
        Err(RuntimeError::UndefinedFunction(name.to_string()))
    }

    // ── Capability access ────────────────────────────────────────────────

    fn eval_attribute(&mut self, object: &Expr, name: &str) -> EvalResult<Value> {
        let object = self.eval_expr(object)?;
        if object != Value::Bot {
            return Err(RuntimeError::TypeMismatch(format!(
                "cannot access attribute '{name}' on {}",
                object.type_name()
            )));
        }
        match name {
            "x" => Ok(Value::Int(self.bot.x())),
            "y" => Ok(Value::Int(self.bot.y())),
            "direction" => Ok(Value::Str(self.bot.direction().to_string())),
            "keys" => Ok(Value::Int(self.bot.keys())),
            _ => Err(RuntimeError::UnknownAttribute(name.to_string())),
        }
    }

    fn eval_method_call(
        &mut self,
        object: &Expr,
        method: &str,
        args: &[Expr],
    ) -> EvalResult<Value> {
        let object = self.eval_expr(object)?;
        if object != Value::Bot {
            return Err(RuntimeError::TypeMismatch(format!(
                "cannot call method '{method}' on {}",
                object.type_name()
            )));
        }
        // argument expressions still evaluate in order for their effects;
        // the capability commands themselves take none
        for arg in args {
            self.eval_expr(arg)?;
        }

        let result = match method {
            "move_forward" | "move_backward" | "turn_left" | "turn_right" => {
                self.count_operation()?;
                let result = match method {
                    "move_forward" => self.bot.move_forward(),
                    "move_backward" => self.bot.move_backward(),
                    "turn_left" => self.bot.turn_left(),
                    _ => self.bot.turn_right(),
                };
                trace!(command = method, "bot command");
                self.pacer.pace(self.limits.pacing_delay());
                result
            }
            "can_move" => {
                // counts as an operation but returns without pacing
                self.count_operation()?;
                self.bot.can_move()
            }
            _ => return Err(RuntimeError::UnknownMethod(method.to_string())),
        };
        Ok(Value::Bool(result))
    }

    fn count_operation(&mut self) -> EvalResult<()> {
        self.operation_count += 1;
        if self.operation_count > self.limits.max_operations {
            Err(RuntimeError::OperationLimit(self.limits.max_operations))
        } else {
            Ok(())
        }
    }

    fn expect_range_int(&mut self, arg: &Expr) -> EvalResult<i64> {
        match self.eval_expr(arg)? {
            Value::Int(n) => Ok(n),
            other => Err(RuntimeError::TypeMismatch(format!(
                "range() arguments must be numbers, got {}",
                other.type_name()
            ))),
        }
    }
}

/// Eagerly materialize an arithmetic progression with exclusive stop.
///
/// Ascending only: the builder does not special-case descending ranges, so
/// any step below 1 yields an empty sequence, as does `start >= stop`.
fn build_range(start: i64, stop: i64, step: i64) -> Vec<i64> {
    let mut sequence = Vec::new();
    if step <= 0 {
        return sequence;
    }
    let mut value = start;
    while value < stop {
        sequence.push(value);
        value = match value.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    sequence
}
