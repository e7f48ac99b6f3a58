//! Single-threaded FIFO executor.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use super::{Schedule, Scheduler, Task};

/// A FIFO queue of deferred tasks, drained explicitly by its owner.
///
/// Clones share the same queue. Tasks deferred while the queue is being drained
/// are appended behind the tasks already waiting, so a chain of continuations
/// is driven one turn at a time from [`run_once`](TaskQueue::run_once) and never
/// nests on the stack.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Scheduler`] that defers onto this queue.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.clone())
    }

    /// Number of tasks waiting to run.
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run the oldest waiting task. Returns `false` if the queue was empty.
    pub fn run_once(&self) -> bool {
        // the borrow must end before the task runs, tasks defer more tasks
        let next = self.tasks.borrow_mut().pop_front();
        match next {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until none are left, returning how many ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_once() {
            ran += 1;
        }
        ran
    }

    /// Drop every waiting task without running it.
    ///
    /// Waiting tasks usually own continuations that own this queue's scheduler,
    /// so clearing is how an abandoned queue releases them.
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.tasks.borrow_mut());
        drop(dropped);
    }
}

impl Schedule for TaskQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue").field("len", &self.len()).finish()
    }
}
