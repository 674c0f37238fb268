//! Step IDs for the flat chain arena.

use std::fmt;

/// Index into a [`Chain`](crate::Chain) arena.
///
/// A receiver's `StepId` is always lower than the `StepId` of the step that
/// reads from it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct StepId(u32);

impl StepId {
    /// Create a new `StepId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        StepId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}
