//! Nullsafe IR - the access chain model.
//!
//! This crate contains the data structures shared by chain builders and the
//! evaluator:
//! - `Value` for present runtime values (absence is `Option::None`, never a value)
//! - `Name` for member and method identifiers
//! - `AccessStep` nodes stored in a flat `Chain` arena, addressed by `StepId`
//! - `ChainBuilder` for assembling a chain from closures, one step at a time
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: steps live in one `Vec`, receivers are `StepId`
//!   indices, never `Box<AccessStep>`.
//! - **Closures, not names**: every member read and method call carries the
//!   function that performs it. Names are kept for rendering and diagnostics.
//! - **Linear by construction**: a step's receiver is always an earlier arena
//!   slot, so chains are finite, acyclic and have exactly one root.

mod chain;
mod name;
mod step;
mod step_id;
mod value;

pub use chain::{Chain, ChainBuilder};
pub use name::Name;
pub use step::{
    AccessStep, ArgumentExpr, CallTarget, CapturedArg, InstanceCall, InstanceRead, IntoOutcome,
    MemberKind, MemberSource, Outcome, Raised, StaticCall, StaticRead, StepShape,
};
pub use step_id::StepId;
pub use value::{FromValue, IntoValue, ObjectRef, ReceiverMismatch, Value};
