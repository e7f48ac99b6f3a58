//! Driver errors.

use thiserror::Error;

/// Why a driver could not produce an outcome.
///
/// A reaction's own errors are never wrapped in this type; drivers report
/// them as the inner `Err` of `Result<Result<T, E>, RunError>`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The queue went idle before the continuation was resolved. Some
    /// reaction dropped its continuation instead of resolving it.
    #[error("stalled after {tasks} tasks: the continuation was never resolved")]
    Stalled {
        /// Tasks run before the queue went idle.
        tasks: usize,
    },

    /// The task budget ran out before the continuation was resolved.
    #[error("task budget of {limit} exhausted before an outcome was reported")]
    BudgetExhausted {
        /// The configured budget.
        limit: usize,
    },
}
