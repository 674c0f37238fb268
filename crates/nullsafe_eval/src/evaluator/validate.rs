//! Up-front rejection of chains the evaluator cannot run.

use nullsafe_ir::{ArgumentExpr, Chain, StepShape};
use nullsafe_stack::ensure_sufficient_stack;

use crate::{EvalError, EvalResult};

/// Fail if `chain`, or any chain nested in its arguments, contains an
/// unsupported step.
///
/// Runs before evaluation so a broken chain fails even when an absent value
/// would have short-circuited before the bad step.
pub(super) fn check_supported(chain: &Chain) -> EvalResult<()> {
    for (_, step) in chain.steps() {
        if let StepShape::Unsupported { construct, .. } = step.shape() {
            tracing::error!(%construct, chain = %chain, "unsupported construct in access chain");
            return Err(EvalError::unsupported(construct, chain));
        }
        for argument in step.arguments() {
            if let ArgumentExpr::Nested(inner) = argument {
                ensure_sufficient_stack(|| check_supported(inner))?;
            }
        }
    }
    Ok(())
}
