//! `ChainBuilder` for assembling an access chain step by step.
//!
//! Start from a root (`captured`, `constant`, `null`, `static_property`,
//! `static_field`, `static_call`), then append steps that act on the
//! previous one:
//!
//! ```text
//! let chain = ChainBuilder::captured(Some(Arc::clone(&node)))
//!     .property("me_p", |v| node_of(v).map(|n| n.me_p.clone()))
//!     .call("value_m", [], |v, _| node_of(v)?.value_m())
//!     .build();
//! ```

use super::{to_u32, Chain};
use crate::step::IntoOutcome;
use crate::{
    AccessStep, ArgumentExpr, CallTarget, IntoValue, MemberKind, MemberSource, Name, StepId, Value,
};

/// Fluent builder for a linear access chain.
///
/// Every appended step takes the current terminal as its receiver, so the
/// resulting chain is acyclic and has exactly one root.
pub struct ChainBuilder {
    steps: Vec<AccessStep>,
}

impl ChainBuilder {
    fn start(root: AccessStep) -> Self {
        ChainBuilder { steps: vec![root] }
    }

    /// Start from a value captured from the calling context.
    pub fn captured<T: IntoValue>(value: Option<T>) -> Self {
        Self::start(AccessStep::Captured {
            value: value.map(IntoValue::into_value),
        })
    }

    /// Start from a present literal.
    pub fn constant(value: impl IntoValue) -> Self {
        Self::start(AccessStep::Captured {
            value: Some(value.into_value()),
        })
    }

    /// Start from an absent literal.
    pub fn null() -> Self {
        Self::start(AccessStep::Captured { value: None })
    }

    /// Start from a receiver-less property.
    pub fn static_property<F, R>(name: impl Into<Name>, read: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoOutcome,
    {
        Self::static_member(MemberKind::Property, name.into(), read)
    }

    /// Start from a receiver-less field.
    pub fn static_field<F, R>(name: impl Into<Name>, read: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoOutcome,
    {
        Self::static_member(MemberKind::Field, name.into(), read)
    }

    fn static_member<F, R>(kind: MemberKind, name: Name, read: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoOutcome,
    {
        Self::start(AccessStep::MemberRead {
            kind,
            name,
            source: MemberSource::Static {
                read: Box::new(move || read().into_outcome()),
            },
        })
    }

    /// Start from a receiver-less function call.
    pub fn static_call<F, R>(
        name: impl Into<Name>,
        arguments: impl IntoIterator<Item = ArgumentExpr>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&[Option<Value>]) -> R + 'static,
        R: IntoOutcome,
    {
        Self::start(AccessStep::MethodCall {
            name: name.into(),
            target: CallTarget::Static {
                invoke: Box::new(move |args: &[Option<Value>]| invoke(args).into_outcome()),
            },
            arguments: arguments.into_iter().collect(),
        })
    }

    /// The step the next appended step will act on.
    #[inline]
    pub fn terminal(&self) -> StepId {
        StepId::new(to_u32(self.steps.len() - 1))
    }

    /// Read a field off the current terminal.
    #[must_use]
    pub fn field<F, R>(self, name: impl Into<Name>, read: F) -> Self
    where
        F: Fn(&Value) -> R + 'static,
        R: IntoOutcome,
    {
        self.member(MemberKind::Field, name.into(), read)
    }

    /// Read a property off the current terminal.
    #[must_use]
    pub fn property<F, R>(self, name: impl Into<Name>, read: F) -> Self
    where
        F: Fn(&Value) -> R + 'static,
        R: IntoOutcome,
    {
        self.member(MemberKind::Property, name.into(), read)
    }

    fn member<F, R>(mut self, kind: MemberKind, name: Name, read: F) -> Self
    where
        F: Fn(&Value) -> R + 'static,
        R: IntoOutcome,
    {
        let owner = self.terminal();
        self.steps.push(AccessStep::MemberRead {
            kind,
            name,
            source: MemberSource::Owner {
                owner,
                read: Box::new(move |instance: &Value| read(instance).into_outcome()),
            },
        });
        self
    }

    /// Call a method on the current terminal.
    #[must_use]
    pub fn call<F, R>(
        mut self,
        name: impl Into<Name>,
        arguments: impl IntoIterator<Item = ArgumentExpr>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&Value, &[Option<Value>]) -> R + 'static,
        R: IntoOutcome,
    {
        let receiver = self.terminal();
        self.steps.push(AccessStep::MethodCall {
            name: name.into(),
            target: CallTarget::Receiver {
                receiver,
                invoke: Box::new(move |instance: &Value, args: &[Option<Value>]| {
                    invoke(instance, args).into_outcome()
                }),
            },
            arguments: arguments.into_iter().collect(),
        });
        self
    }

    /// Record a construct that cannot be expressed as a step.
    ///
    /// The chain still builds; evaluating it fails.
    #[must_use]
    pub fn unsupported(mut self, construct: impl Into<Name>) -> Self {
        let receiver = Some(self.terminal());
        self.steps.push(AccessStep::Unsupported {
            construct: construct.into(),
            receiver,
        });
        self
    }

    pub fn build(self) -> Chain {
        Chain { steps: self.steps }
    }
}
