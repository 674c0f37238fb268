//! Evaluation settings.

use nullsafe_stack::DepthLimit;

/// Settings for an [`Evaluator`](crate::Evaluator).
///
/// The default follows the platform: unlimited depth on native targets,
/// where the stack grows on demand, and a fixed limit on WASM.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalConfig {
    depth_limit: DepthLimit,
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `ChainTooDeep` once recursion passes `max` nested steps.
    ///
    /// Nested argument chains count towards the same limit.
    #[must_use]
    pub fn max_depth(mut self, max: usize) -> Self {
        self.depth_limit = DepthLimit::at_most(max);
        self
    }

    /// Remove the depth limit and rely on stack growth alone.
    #[must_use]
    pub fn unlimited_depth(mut self) -> Self {
        self.depth_limit = DepthLimit::UNLIMITED;
        self
    }

    #[inline]
    pub fn depth_limit(&self) -> DepthLimit {
        self.depth_limit
    }
}
