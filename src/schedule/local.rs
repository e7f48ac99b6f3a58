use super::{Schedule, Task};

/// Defers tasks onto the current tokio [`LocalSet`](tokio::task::LocalSet).
///
/// Each task becomes its own local tokio task, so the runtime drives the
/// combinators and their continuations. Deferring outside a `LocalSet`
/// panics, as `tokio::task::spawn_local` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawn;

impl Schedule for LocalSpawn {
    fn defer(&self, task: Task) {
        drop(tokio::task::spawn_local(async move { task() }));
    }
}
