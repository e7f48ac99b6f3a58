//! Driver configuration.

/// Limits applied by [`handle_with`](crate::handle_with) and
/// [`handle_on`](crate::handle_on).
///
/// The default is unbounded.
///
/// ```rust
/// use reactions::RunConfig;
///
/// let config = RunConfig::default().with_max_tasks(1_000);
/// assert_eq!(config.max_tasks, Some(1_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    /// Most scheduler tasks a single run may execute. `None` means no limit.
    pub max_tasks: Option<usize>,
}

impl RunConfig {
    pub fn with_max_tasks(mut self, limit: usize) -> Self {
        self.max_tasks = Some(limit);
        self
    }

    pub(crate) fn allows(&self, ran: usize) -> bool {
        self.max_tasks.is_none_or(|limit| ran < limit)
    }
}
