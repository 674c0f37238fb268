//! Access steps: the nodes of a chain.
//!
//! Each step either produces a root value (`Captured`, a static read, a
//! static call) or acts on the result of its receiver step. The closures a
//! step carries perform the actual read or invocation; the evaluator only
//! decides *whether* to run them.

use std::fmt;

use crate::{Chain, Name, StepId, Value};

/// Failure raised by a member read, a method call or a captured argument.
///
/// Kept as the original error value; callers downcast to recover its type.
pub type Raised = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of performing one step: a present value, absence, or a failure.
pub type Outcome = Result<Option<Value>, Raised>;

/// Read a member off a present instance.
pub type InstanceRead = Box<dyn Fn(&Value) -> Outcome>;

/// Read a receiver-less (static) member.
pub type StaticRead = Box<dyn Fn() -> Outcome>;

/// Invoke a method on a present instance with evaluated arguments.
pub type InstanceCall = Box<dyn Fn(&Value, &[Option<Value>]) -> Outcome>;

/// Invoke a receiver-less (static) function with evaluated arguments.
pub type StaticCall = Box<dyn Fn(&[Option<Value>]) -> Outcome>;

/// Produce a value captured from the calling context.
pub type CapturedArg = Box<dyn Fn() -> Outcome>;

/// Conversion of a closure's return value into an [`Outcome`].
///
/// Lets member closures return `Option<T>` or `Result<Option<T>, E>` for any
/// `T: IntoValue` instead of spelling out `Outcome`.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl<T: crate::IntoValue> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Outcome {
        Ok(self.map(crate::IntoValue::into_value))
    }
}

impl<T: crate::IntoValue, E: Into<Raised>> IntoOutcome for Result<Option<T>, E> {
    fn into_outcome(self) -> Outcome {
        self.map(|value| value.map(crate::IntoValue::into_value))
            .map_err(Into::into)
    }
}

/// How a member is stored on its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Plain data slot; reading it has no side effects.
    Field,
    /// Computed accessor; reading it runs code and may fail.
    Property,
}

/// Where a member read gets its instance from.
pub enum MemberSource {
    /// Read off the result of an earlier step.
    Owner { owner: StepId, read: InstanceRead },
    /// Receiver-less member.
    Static { read: StaticRead },
}

/// What a method call is invoked on.
pub enum CallTarget {
    /// Invoke on the result of an earlier step.
    Receiver {
        receiver: StepId,
        invoke: InstanceCall,
    },
    /// Receiver-less call.
    Static { invoke: StaticCall },
}

/// One node of an access chain.
pub enum AccessStep {
    /// Read a named field or property.
    MemberRead {
        kind: MemberKind,
        name: Name,
        source: MemberSource,
    },
    /// Invoke a named method with eagerly evaluated arguments.
    MethodCall {
        name: Name,
        target: CallTarget,
        arguments: Vec<ArgumentExpr>,
    },
    /// A literal or a value captured from the calling context. Always a root.
    Captured { value: Option<Value> },
    /// A construct the chain builder met but cannot represent.
    ///
    /// Evaluating a chain that contains one fails before any step runs.
    Unsupported {
        construct: Name,
        receiver: Option<StepId>,
    },
}

/// Borrowed, evaluation-oriented view of an [`AccessStep`].
///
/// Splits every step into "root" and "acts on a receiver" shapes so the
/// evaluator can match once instead of re-checking receiver/callable pairs.
pub enum StepShape<'a> {
    Captured(Option<&'a Value>),
    StaticRead(&'a StaticRead),
    StaticCall {
        invoke: &'a StaticCall,
        arguments: &'a [ArgumentExpr],
    },
    Read {
        owner: StepId,
        read: &'a InstanceRead,
    },
    Call {
        receiver: StepId,
        invoke: &'a InstanceCall,
        arguments: &'a [ArgumentExpr],
    },
    Unsupported {
        construct: &'a Name,
        receiver: Option<StepId>,
    },
}

impl AccessStep {
    /// The step that must be evaluated first to obtain this step's instance.
    pub fn receiver(&self) -> Option<StepId> {
        match self {
            AccessStep::MemberRead {
                source: MemberSource::Owner { owner, .. },
                ..
            } => Some(*owner),
            AccessStep::MethodCall {
                target: CallTarget::Receiver { receiver, .. },
                ..
            } => Some(*receiver),
            AccessStep::Unsupported { receiver, .. } => *receiver,
            AccessStep::MemberRead { .. }
            | AccessStep::MethodCall { .. }
            | AccessStep::Captured { .. } => None,
        }
    }

    /// Whether this step starts a chain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.receiver().is_none()
    }

    /// Member or method name, if the step has one.
    pub fn name(&self) -> Option<&Name> {
        match self {
            AccessStep::MemberRead { name, .. } | AccessStep::MethodCall { name, .. } => Some(name),
            AccessStep::Unsupported { construct, .. } => Some(construct),
            AccessStep::Captured { .. } => None,
        }
    }

    /// Call arguments; empty for every step that is not a call.
    pub fn arguments(&self) -> &[ArgumentExpr] {
        match self {
            AccessStep::MethodCall { arguments, .. } => arguments,
            _ => &[],
        }
    }

    pub fn shape(&self) -> StepShape<'_> {
        match self {
            AccessStep::Captured { value } => StepShape::Captured(value.as_ref()),
            AccessStep::MemberRead { source, .. } => match source {
                MemberSource::Owner { owner, read } => StepShape::Read {
                    owner: *owner,
                    read,
                },
                MemberSource::Static { read } => StepShape::StaticRead(read),
            },
            AccessStep::MethodCall {
                target, arguments, ..
            } => match target {
                CallTarget::Receiver { receiver, invoke } => StepShape::Call {
                    receiver: *receiver,
                    invoke,
                    arguments,
                },
                CallTarget::Static { invoke } => StepShape::StaticCall { invoke, arguments },
            },
            AccessStep::Unsupported {
                construct,
                receiver,
            } => StepShape::Unsupported {
                construct,
                receiver: *receiver,
            },
        }
    }
}

impl fmt::Debug for AccessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStep::MemberRead { kind, name, source } => {
                let mut s = f.debug_struct("MemberRead");
                s.field("kind", kind).field("name", name);
                match source {
                    MemberSource::Owner { owner, .. } => s.field("owner", owner),
                    MemberSource::Static { .. } => s.field("owner", &"static"),
                };
                s.finish()
            }
            AccessStep::MethodCall {
                name,
                target,
                arguments,
            } => {
                let mut s = f.debug_struct("MethodCall");
                s.field("name", name);
                match target {
                    CallTarget::Receiver { receiver, .. } => s.field("receiver", receiver),
                    CallTarget::Static { .. } => s.field("receiver", &"static"),
                };
                s.field("arguments", arguments).finish()
            }
            AccessStep::Captured { value } => {
                f.debug_struct("Captured").field("value", value).finish()
            }
            AccessStep::Unsupported {
                construct,
                receiver,
            } => f
                .debug_struct("Unsupported")
                .field("construct", construct)
                .field("receiver", receiver)
                .finish(),
        }
    }
}

/// A call argument.
///
/// Arguments are evaluated once, eagerly and left to right, before the call.
/// They are not null-safe: absence inside a nested argument chain is an error.
pub enum ArgumentExpr {
    /// A literal, possibly absent.
    Constant(Option<Value>),
    /// A value produced from the calling context when the call is reached.
    Captured(CapturedArg),
    /// A sub-chain evaluated strictly.
    Nested(Chain),
}

impl ArgumentExpr {
    pub fn constant(value: impl crate::IntoValue) -> Self {
        ArgumentExpr::Constant(Some(value.into_value()))
    }

    /// An absent literal argument.
    pub fn null() -> Self {
        ArgumentExpr::Constant(None)
    }

    pub fn captured<F, R>(produce: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoOutcome,
    {
        ArgumentExpr::Captured(Box::new(move || produce().into_outcome()))
    }

    pub fn nested(chain: Chain) -> Self {
        ArgumentExpr::Nested(chain)
    }
}

impl fmt::Debug for ArgumentExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentExpr::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            ArgumentExpr::Captured(_) => f.write_str("Captured(..)"),
            ArgumentExpr::Nested(chain) => write!(f, "Nested({chain})"),
        }
    }
}

#[cfg(test)]
mod tests;
