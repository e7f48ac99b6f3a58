use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::done::Latch;
use crate::{Done, Reactions, SharedReaction};

/// Start every reaction with the original context and collect their results by
/// index.
///
/// Reports the first error seen, or all results once every reaction has
/// succeeded. No reactions means an empty result.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let tag = |suffix: &'static str| {
///     from_fn(move |ctx: String, done: Done<String, ()>| done.ok(format!("{ctx}{suffix}"))).shared()
/// };
/// let tags: Reactions<String, String, ()> = vec![tag("1"), tag("2"), tag("3")].into();
///
/// let tagged = handle(&make::collect_parallel(tags), "t".to_string()).unwrap();
/// assert_eq!(tagged, Ok(vec!["t1".to_string(), "t2".to_string(), "t3".to_string()]));
/// ```
pub fn collect_parallel<C, T, E>(reactions: Reactions<C, T, E>, context: C, done: Done<Vec<T>, E>)
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    let jobs = reactions.iter().map(|reaction| (Rc::clone(reaction), context.clone()));
    fan_out(jobs, done);
}

/// Start every reaction with the original context and wait for all of them.
///
/// Reports the first error seen, or the context once every reaction has
/// succeeded.
pub fn parallel<C, T, E>(reactions: Reactions<C, T, E>, context: C, done: Done<C, E>)
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    let original = context.clone();
    collect_parallel(
        reactions,
        context,
        Done::fast_guard(done, move |_, done| done.ok(original)),
    );
}

/// Run `reaction` concurrently on every item, collecting the results in item
/// order.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let square = from_fn(|n: u32, done: Done<u32, ()>| done.ok(n * n)).shared();
/// assert_eq!(handle(&make::map(square), vec![1, 2, 3]).unwrap(), Ok(vec![1, 4, 9]));
/// ```
pub fn map<I, T, E>(reaction: SharedReaction<I, T, E>, items: Vec<I>, done: Done<Vec<T>, E>)
where
    I: 'static,
    T: 'static,
    E: 'static,
{
    let jobs = items.into_iter().map(|item| (Rc::clone(&reaction), item));
    fan_out(jobs, done);
}

fn fan_out<I, T, E, J>(jobs: J, done: Done<Vec<T>, E>)
where
    I: 'static,
    T: 'static,
    E: 'static,
    J: ExactSizeIterator<Item = (SharedReaction<I, T, E>, I)>,
{
    let count = jobs.len();
    if count == 0 {
        return done.ok(Vec::new());
    }

    let scheduler = done.scheduler().clone();
    let join = Rc::new(Join::new(count, done));
    for (index, (reaction, input)) in jobs.enumerate() {
        let join = Rc::clone(&join);
        reaction.react(input, Done::new(&scheduler, move |outcome| join.settle(index, outcome)));
    }
}

/// State shared by every reaction of one fan-out.
struct Join<T, E> {
    finished: Latch,
    pending: Cell<usize>,
    slots: RefCell<Vec<Option<T>>>,
    done: RefCell<Option<Done<Vec<T>, E>>>,
}

impl<T: 'static, E: 'static> Join<T, E> {
    fn new(count: usize, done: Done<Vec<T>, E>) -> Self {
        Self {
            finished: Latch::default(),
            pending: Cell::new(count),
            slots: RefCell::new((0..count).map(|_| None).collect()),
            done: RefCell::new(Some(done)),
        }
    }

    fn settle(&self, index: usize, outcome: Result<T, E>) {
        if self.finished.is_tripped() {
            tracing::trace!(index, "fan-out already reported, discarding late outcome");
            return;
        }
        match outcome {
            Err(error) => {
                self.finished.trip();
                tracing::debug!(index, "fan-out short-circuited on error");
                self.report(Err(error));
            }
            Ok(value) => {
                self.slots.borrow_mut()[index] = Some(value);
                let pending = self.pending.get() - 1;
                self.pending.set(pending);
                if pending == 0 {
                    self.finished.trip();
                    let results = self.slots.take().into_iter().flatten().collect();
                    self.report(Ok(results));
                }
            }
        }
    }

    fn report(&self, outcome: Result<Vec<T>, E>) {
        let done = self.done.borrow_mut().take();
        if let Some(done) = done {
            done.resolve(outcome);
        }
    }
}
