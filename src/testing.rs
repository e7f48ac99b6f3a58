//! Helpers shared by the unit tests.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::build::from_fn;
use crate::schedule::{Scheduler, TaskQueue};
use crate::{Done, Reaction, SharedReaction};

pub(crate) type TestError = &'static str;

/// Start something that reports through a continuation, drain the queue, and
/// return what (if anything) reached the continuation.
pub(crate) fn settle<T: 'static, E: 'static>(start: impl FnOnce(Done<T, E>)) -> Option<Result<T, E>> {
    let queue = TaskQueue::new();
    let slot = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    let done = Done::new(&queue.scheduler(), move |outcome| {
        assert!(sink.borrow().is_none(), "terminal continuation reached twice");
        *sink.borrow_mut() = Some(outcome);
    });
    start(done);
    queue.run_until_idle();
    slot.borrow_mut().take()
}

/// Ordered record of which reactions ran with which context.
#[derive(Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|entry| entry.split('(').next() == Some(name))
            .count()
    }
}

/// Records `name(context)` and reports `value`.
pub(crate) fn reporting<C, T>(journal: &Journal, name: &'static str, value: T) -> SharedReaction<C, T, TestError>
where
    C: Debug + 'static,
    T: Clone + 'static,
{
    let journal = journal.clone();
    from_fn(move |context: C, done: Done<T, TestError>| {
        journal.record(format!("{name}({context:?})"));
        done.ok(value.clone())
    })
    .shared()
}

/// Records `name(context)` and reports the context back.
pub(crate) fn echoing<C>(journal: &Journal, name: &'static str) -> SharedReaction<C, C, TestError>
where
    C: Debug + 'static,
{
    let journal = journal.clone();
    from_fn(move |context: C, done: Done<C, TestError>| {
        journal.record(format!("{name}({context:?})"));
        done.ok(context)
    })
    .shared()
}

/// Records `name(context)` and fails with `error`.
pub(crate) fn failing<C, T>(journal: &Journal, name: &'static str, error: TestError) -> SharedReaction<C, T, TestError>
where
    C: Debug + 'static,
    T: 'static,
{
    let journal = journal.clone();
    from_fn(move |context: C, done: Done<T, TestError>| {
        journal.record(format!("{name}({context:?})"));
        done.err(error)
    })
    .shared()
}

/// Run `task` after `hops` further scheduler turns.
pub(crate) fn after_turns(scheduler: &Scheduler, hops: usize, task: impl FnOnce() + 'static) {
    if hops == 0 {
        task();
        return;
    }
    let next = scheduler.clone();
    scheduler.defer(move || after_turns(&next, hops - 1, task));
}

/// Reports `outcome` only after `hops` scheduler turns.
pub(crate) fn delayed<C, T>(hops: usize, outcome: Result<T, TestError>) -> SharedReaction<C, T, TestError>
where
    C: 'static,
    T: Clone + 'static,
{
    from_fn(move |_: C, done: Done<T, TestError>| {
        let outcome = outcome.clone();
        let scheduler = done.scheduler().clone();
        after_turns(&scheduler, hops, move || done.resolve(outcome));
    })
    .shared()
}
