//! The chain arena.
//!
//! A `Chain` owns its steps in a flat `Vec`. The terminal (outermost) step is
//! the last one pushed; following `receiver()` links from it always reaches
//! the single root at index 0.

mod builder;

use std::fmt;

use crate::{AccessStep, ArgumentExpr, StepId};

pub use builder::ChainBuilder;

/// A complete access chain, ready to be evaluated once or many times.
pub struct Chain {
    steps: Vec<AccessStep>,
}

impl Chain {
    /// The outermost step, where evaluation starts.
    #[inline]
    pub fn terminal(&self) -> StepId {
        StepId::new(to_u32(self.steps.len() - 1))
    }

    /// Get a step by ID.
    #[inline]
    pub fn step(&self, id: StepId) -> &AccessStep {
        &self.steps[id.index()]
    }

    /// Number of steps, root included.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Iterate over all steps from the root outwards.
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &AccessStep)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (StepId::new(to_u32(i)), step))
    }

    /// IDs on the receiver path from the root to `id`, root first.
    pub fn path_to(&self, id: StepId) -> Vec<StepId> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.step(current).receiver();
        }
        path.reverse();
        path
    }

    fn write_path(&self, f: &mut fmt::Formatter<'_>, id: StepId) -> fmt::Result {
        for step_id in self.path_to(id) {
            let step = self.step(step_id);
            if !step.is_root() {
                f.write_str(".")?;
            }
            match step {
                AccessStep::Captured { value: Some(value) } => f.write_str(&value.literal())?,
                AccessStep::Captured { value: None } => f.write_str("null")?,
                AccessStep::MemberRead { name, .. } => write!(f, "{name}")?,
                AccessStep::MethodCall {
                    name, arguments, ..
                } => {
                    write!(f, "{name}(")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write_argument(f, argument)?;
                    }
                    f.write_str(")")?;
                }
                AccessStep::Unsupported { construct, .. } => write!(f, "<{construct}>")?,
            }
        }
        Ok(())
    }

    /// Render the path up to and including `id`.
    pub fn render_to(&self, id: StepId) -> String {
        struct Partial<'a>(&'a Chain, StepId);

        impl fmt::Display for Partial<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_path(f, self.1)
            }
        }

        Partial(self, id).to_string()
    }
}

fn write_argument(f: &mut fmt::Formatter<'_>, argument: &ArgumentExpr) -> fmt::Result {
    match argument {
        ArgumentExpr::Constant(Some(value)) => f.write_str(&value.literal()),
        ArgumentExpr::Constant(None) => f.write_str("null"),
        ArgumentExpr::Captured(_) => f.write_str("<captured>"),
        ArgumentExpr::Nested(chain) => write!(f, "{chain}"),
    }
}

/// Renders the accessor path, e.g. `"hallo".replace("l", <captured>)`.
impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_path(f, self.terminal())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("path", &format_args!("{self}"))
            .field("steps", &self.steps)
            .finish()
    }
}

#[inline]
fn to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or_else(|_| panic!("chain exceeds u32::MAX steps"))
}
