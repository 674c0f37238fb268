//! Stack safety for the recursive chain walk.
//!
//! Evaluating an access chain recurses once per step, so a chain built by a
//! careless (or generated) caller can be arbitrarily deep. Two tools keep that
//! from taking the process down:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand through
//!   the `stacker` crate. On WASM it is a plain passthrough.
//! - [`DepthLimit`] turns a configured maximum depth into a recoverable
//!   [`DepthExceeded`] error instead of relying on stack growth alone.
//!
//! # Usage
//!
//! ```text
//! fn resolve(&self, id: StepId, depth: usize) -> EvalResult<Option<Value>> {
//!     self.limit.check(depth)?;
//!     ensure_sufficient_stack(|| {
//!         // ... recurse into the receiver with depth + 1 ...
//!     })
//! }
//! ```

use std::fmt;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone, a new segment is allocated
/// before `f` runs.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Maximum recursion depth for one evaluation, or unlimited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DepthLimit(Option<usize>);

impl DepthLimit {
    /// No limit: rely on stack growth only.
    pub const UNLIMITED: DepthLimit = DepthLimit(None);

    /// Limit recursion to `max` nested steps.
    #[inline]
    pub const fn at_most(max: usize) -> Self {
        DepthLimit(Some(max))
    }

    /// The platform default.
    ///
    /// Unlimited on native targets where `stacker` can grow the stack,
    /// 200 on WASM where it cannot.
    #[inline]
    pub const fn platform_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            DepthLimit(Some(200))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            DepthLimit(None)
        }
    }

    /// The configured maximum, if any.
    #[inline]
    pub const fn max(self) -> Option<usize> {
        self.0
    }

    /// Check that `depth` does not exceed the limit.
    #[inline]
    pub fn check(self, depth: usize) -> Result<(), DepthExceeded> {
        match self.0 {
            Some(limit) if depth > limit => Err(DepthExceeded { depth, limit }),
            _ => Ok(()),
        }
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Recursion went past the configured [`DepthLimit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub depth: usize,
    pub limit: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recursion depth {} exceeds limit of {}", self.depth, self.limit)
    }
}

impl std::error::Error for DepthExceeded {}

#[cfg(test)]
mod tests;
