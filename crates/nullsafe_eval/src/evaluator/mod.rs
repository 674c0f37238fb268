//! The chain evaluator.
//!
//! Evaluation is a depth-first walk from the terminal step down its receiver
//! links to the root, then back out:
//!
//! 1. A step with a receiver evaluates the receiver first. If that comes back
//!    absent, the step returns absent without running its own read or call.
//! 2. A root step produces its value directly: a captured value, a static
//!    read or a static call.
//! 3. Call arguments are evaluated after the receiver is known to be present
//!    and before the call, left to right, without null-safety.
//!
//! Each frame has one exit per outcome (absent, present, failed), so absence
//! propagates outwards as `Ok(None)` and failures as `Err` without any frame
//! touching them.

mod validate;

use nullsafe_ir::{ArgumentExpr, Chain, FromValue, StepId, StepShape, Value};
use nullsafe_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::{EvalConfig, EvalError, EvalResult};

/// Evaluated call arguments; most calls take a handful.
type Arguments = SmallVec<[Option<Value>; 4]>;

/// What an absent receiver means in the chain being walked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Absence {
    /// Top-level chain: stop and report absence.
    ShortCircuit,
    /// Nested argument chain: dereferencing absence is a failure.
    Fail,
}

/// Null-safe chain evaluator.
///
/// Holds configuration only; every evaluation is independent, so one
/// evaluator can be reused for any number of chains.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate `chain`, returning `None` if any receiver along it is absent.
    #[tracing::instrument(level = "debug", skip_all, fields(chain = %chain))]
    pub fn evaluate(&self, chain: &Chain) -> EvalResult<Option<Value>> {
        validate::check_supported(chain)?;
        let value = self.resolve(chain, chain.terminal(), Absence::ShortCircuit, 0)?;
        tracing::debug!(present = value.is_some(), "chain evaluated");
        Ok(value)
    }

    /// Evaluate `chain`, substituting `default` only when the result is absent.
    pub fn or_default<T: FromValue>(&self, chain: &Chain, default: T) -> EvalResult<T> {
        match self.evaluate(chain)? {
            None => Ok(default),
            Some(value) => T::from_value(value).map_err(|found| EvalError::ResultTypeMismatch {
                expected: T::expected(),
                found: found.type_name(),
            }),
        }
    }

    /// Evaluate `chain`, substituting `T::default()` when the result is absent.
    pub fn or_zero<T: FromValue + Default>(&self, chain: &Chain) -> EvalResult<T> {
        self.or_default(chain, T::default())
    }

    fn resolve(
        &self,
        chain: &Chain,
        id: StepId,
        absence: Absence,
        depth: usize,
    ) -> EvalResult<Option<Value>> {
        self.config.depth_limit().check(depth)?;
        ensure_sufficient_stack(|| match chain.step(id).shape() {
            StepShape::Captured(value) => Ok(value.cloned()),
            StepShape::StaticRead(read) => read().map_err(EvalError::Raised),
            StepShape::StaticCall { invoke, arguments } => {
                let args = self.eval_arguments(arguments, depth)?;
                invoke(args.as_slice()).map_err(EvalError::Raised)
            }
            StepShape::Read { owner, read } => {
                let Some(instance) = self.resolve_receiver(chain, owner, id, absence, depth)? else {
                    return Ok(None);
                };
                read(&instance).map_err(EvalError::Raised)
            }
            StepShape::Call {
                receiver,
                invoke,
                arguments,
            } => {
                let Some(instance) = self.resolve_receiver(chain, receiver, id, absence, depth)?
                else {
                    return Ok(None);
                };
                let args = self.eval_arguments(arguments, depth)?;
                invoke(&instance, args.as_slice()).map_err(EvalError::Raised)
            }
            // Rejected up front by `check_supported`.
            StepShape::Unsupported { construct, .. } => Err(EvalError::unsupported(construct, chain)),
        })
    }

    /// Evaluate the receiver of `step`, applying the chain's absence policy.
    fn resolve_receiver(
        &self,
        chain: &Chain,
        receiver: StepId,
        step: StepId,
        absence: Absence,
        depth: usize,
    ) -> EvalResult<Option<Value>> {
        let instance = self.resolve(chain, receiver, absence, depth + 1)?;
        if instance.is_none() {
            match absence {
                Absence::ShortCircuit => {
                    tracing::trace!(at = %chain.render_to(receiver), "absent receiver, short-circuiting");
                }
                Absence::Fail => {
                    return Err(EvalError::AbsentReceiver {
                        step: chain
                            .step(step)
                            .name()
                            .cloned()
                            .unwrap_or_else(|| "?".into()),
                        path: chain.render_to(receiver),
                    });
                }
            }
        }
        Ok(instance)
    }

    fn eval_arguments(&self, arguments: &[ArgumentExpr], depth: usize) -> EvalResult<Arguments> {
        arguments
            .iter()
            .map(|argument| self.eval_argument(argument, depth))
            .collect()
    }

    fn eval_argument(&self, argument: &ArgumentExpr, depth: usize) -> EvalResult<Option<Value>> {
        match argument {
            ArgumentExpr::Constant(value) => Ok(value.clone()),
            ArgumentExpr::Captured(produce) => produce().map_err(EvalError::Raised),
            ArgumentExpr::Nested(inner) => {
                self.resolve(inner, inner.terminal(), Absence::Fail, depth + 1)
            }
        }
    }
}
