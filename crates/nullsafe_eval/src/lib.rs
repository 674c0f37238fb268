//! Nullsafe Eval - null-safe evaluation of access chains.
//!
//! Walks a [`Chain`] from its root outwards. If any receiver turns out to be
//! absent, evaluation stops right there and the caller's default is returned;
//! steps past that point never run.
//!
//! # Entry points
//!
//! - [`or_default`]: evaluate and substitute `default` on absence
//! - [`or_zero`]: same, with `T::default()` as the default
//! - [`evaluate`]: untyped, returns `None` on absence
//!
//! Use [`Evaluator::with_config`] to set a recursion depth limit.
//!
//! # Errors
//!
//! A failure raised by a member read, a method call or a captured argument
//! surfaces as [`EvalError::Raised`] holding the original error value.
//! Absence is never an error.

mod config;
pub mod errors;
mod evaluator;
mod tracing_setup;

pub use config::EvalConfig;
pub use errors::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use tracing_setup::init_tracing;

// Re-export the chain model so callers need a single dependency.
pub use nullsafe_ir::{
    AccessStep, ArgumentExpr, Chain, ChainBuilder, FromValue, IntoOutcome, IntoValue, MemberKind,
    Name, ObjectRef, Outcome, Raised, ReceiverMismatch, StepId, Value,
};
pub use nullsafe_stack::DepthLimit;

/// Evaluate `chain`, returning `default` if any step along it is absent.
///
/// Present values are returned unchanged, including `0`, `""` and `false`.
pub fn or_default<T: FromValue>(chain: &Chain, default: T) -> EvalResult<T> {
    Evaluator::new().or_default(chain, default)
}

/// Evaluate `chain`, returning `T::default()` if any step along it is absent.
pub fn or_zero<T: FromValue + Default>(chain: &Chain) -> EvalResult<T> {
    Evaluator::new().or_zero(chain)
}

/// Evaluate `chain`, returning `None` if any step along it is absent.
pub fn evaluate(chain: &Chain) -> EvalResult<Option<Value>> {
    Evaluator::new().evaluate(chain)
}
