//! Deferring work to a later turn
//!
//! Every continuation dispatches through a [`Scheduler`], the single "run this
//! later" capability the combinators depend on. Deferring dispatch is what keeps
//! a reaction from re-entering its caller's stack frame, and what lets long
//! chains of reactions run without growing the call stack.
//!
//! Two implementations ship with the crate:
//!
//! - [`TaskQueue`] - a single-threaded FIFO queue drained by its owner
//! - [`LocalSpawn`] - hands tasks to `tokio::task::spawn_local` (feature `tokio`)
//!
//! Anything else can be plugged in by implementing [`Schedule`].

#[cfg(feature = "tokio")]
mod local;
mod queue;

use std::fmt;
use std::rc::Rc;

#[cfg(feature = "tokio")]
pub use local::LocalSpawn;
pub use queue::TaskQueue;

/// A zero-argument unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// A "run later" primitive.
///
/// Implementations must run each task after the current synchronous execution
/// has returned, and must run tasks deferred from the same turn in the order
/// they were deferred. No retries, no priorities.
pub trait Schedule {
    /// Queue `task` to run on a later turn.
    fn defer(&self, task: Task);
}

/// Type-erased, cheaply clonable handle to a [`Schedule`] implementation.
///
/// ```rust
/// use reactions::{Scheduler, TaskQueue};
/// use std::{cell::Cell, rc::Rc};
///
/// let queue = TaskQueue::new();
/// let scheduler: Scheduler = queue.scheduler();
///
/// let ran = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&ran);
/// scheduler.defer(move || flag.set(true));
///
/// assert!(!ran.get());
/// queue.run_until_idle();
/// assert!(ran.get());
/// ```
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<dyn Schedule>,
}

impl Scheduler {
    /// Wrap a [`Schedule`] implementation.
    pub fn new<S: Schedule + 'static>(schedule: S) -> Self {
        Self {
            inner: Rc::new(schedule),
        }
    }

    /// Run `task` on a later turn.
    pub fn defer<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.inner.defer(Box::new(task));
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler").finish_non_exhaustive()
    }
}
