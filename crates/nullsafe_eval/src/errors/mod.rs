//! Evaluation errors.
//!
//! Absence is not represented here: a chain that hits an absent receiver
//! evaluates to `None` (and then to the caller's default). Everything in
//! this module is a real failure and reaches the caller unchanged.

use nullsafe_ir::{Chain, Name, Raised};
use nullsafe_stack::DepthExceeded;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// A member read, method call or captured argument failed.
    ///
    /// Carries the original error value: `Display` and `source()` are the
    /// inner error's own. Recover its type with [`EvalError::downcast_raised`].
    #[error(transparent)]
    Raised(Raised),

    /// The chain contains a step the evaluator cannot run.
    ///
    /// Raised before any step executes, whatever the data looks like.
    #[error("unsupported construct `{construct}` in chain `{chain}`")]
    UnsupportedConstruct { construct: Name, chain: String },

    /// A nested argument chain dereferenced an absent value.
    ///
    /// Arguments are evaluated strictly, so this is a failure rather than a
    /// short-circuit of the outer chain.
    #[error("cannot apply `{step}` to absent `{path}` in call argument")]
    AbsentReceiver { step: Name, path: String },

    #[error("chain depth {depth} exceeds limit of {limit}")]
    ChainTooDeep { depth: usize, limit: usize },

    #[error("chain produced a value of type {found}, expected {expected}")]
    ResultTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl EvalError {
    pub(crate) fn unsupported(construct: &Name, chain: &Chain) -> Self {
        EvalError::UnsupportedConstruct {
            construct: construct.clone(),
            chain: chain.to_string(),
        }
    }

    /// Whether the error points at a broken chain rather than at the data.
    ///
    /// Fatal errors must not be retried or papered over with a default.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvalError::UnsupportedConstruct { .. })
    }

    /// Borrow the raised error as `E`, if it is one.
    pub fn raised_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            EvalError::Raised(inner) => inner.downcast_ref(),
            _ => None,
        }
    }

    /// Take the raised error back as `E`, or return `self` untouched.
    pub fn downcast_raised<E: std::error::Error + 'static>(self) -> Result<E, Self> {
        match self {
            EvalError::Raised(inner) => inner
                .downcast::<E>()
                .map(|boxed| *boxed)
                .map_err(EvalError::Raised),
            other => Err(other),
        }
    }
}

impl From<DepthExceeded> for EvalError {
    fn from(err: DepthExceeded) -> Self {
        EvalError::ChainTooDeep {
            depth: err.depth,
            limit: err.limit,
        }
    }
}
