//! Functions for driving reactions to completion.
//!
//! This module provides synchronous drivers that run a reaction on a
//! [`TaskQueue`] until it goes idle, and an asynchronous driver that hands the
//! outcome to a future while someone else drives the scheduler.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::config::RunConfig;
use crate::error::RunError;
use crate::schedule::{Scheduler, TaskQueue};
use crate::{Done, Reaction};

/// Run `reaction` on `context` to completion.
///
/// This is the most commonly used driver: a shorthand for [`handle_with`]
/// with the default (unbounded) configuration.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let greet = from_fn(|name: &str, done: Done<String, ()>| done.ok(format!("hello {name}")));
/// assert_eq!(handle(&greet, "world").unwrap(), Ok("hello world".to_string()));
/// ```
pub fn handle<R, C, T, E>(reaction: &R, context: C) -> Result<Result<T, E>, RunError>
where
    R: Reaction<C, T, E> + ?Sized,
    T: 'static,
    E: 'static,
{
    handle_with(reaction, context, &RunConfig::default())
}

/// Run `reaction` on a fresh queue, honouring `config`.
pub fn handle_with<R, C, T, E>(reaction: &R, context: C, config: &RunConfig) -> Result<Result<T, E>, RunError>
where
    R: Reaction<C, T, E> + ?Sized,
    T: 'static,
    E: 'static,
{
    handle_on(&TaskQueue::new(), reaction, context, config)
}

/// Run `reaction` on a caller-owned `queue`.
///
/// Drains the queue until it is idle, so work left behind by the reaction
/// (late results of a short-circuited fan-out, say) runs too. Tasks already
/// waiting on the queue run alongside the reaction and count against the
/// budget.
///
/// When the budget runs out the queue is cleared. The outcome is still
/// returned if it arrived in time; otherwise the run fails with
/// [`RunError::BudgetExhausted`].
pub fn handle_on<R, C, T, E>(
    queue: &TaskQueue,
    reaction: &R,
    context: C,
    config: &RunConfig,
) -> Result<Result<T, E>, RunError>
where
    R: Reaction<C, T, E> + ?Sized,
    T: 'static,
    E: 'static,
{
    let slot = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    let done = Done::new(&queue.scheduler(), move |outcome| {
        *sink.borrow_mut() = Some(outcome);
    });
    reaction.react(context, done);

    let mut ran = 0;
    while !queue.is_empty() {
        if !config.allows(ran) {
            tracing::debug!(ran, pending = queue.len(), "task budget exhausted, clearing queue");
            queue.clear();
            let outcome = slot.borrow_mut().take();
            return match (outcome, config.max_tasks) {
                (Some(outcome), _) => Ok(outcome),
                (None, limit) => Err(RunError::BudgetExhausted {
                    limit: limit.unwrap_or(ran),
                }),
            };
        }
        queue.run_once();
        ran += 1;
    }

    let outcome = slot.borrow_mut().take();
    match outcome {
        Some(outcome) => Ok(outcome),
        None => {
            tracing::debug!(tasks = ran, "queue idle with no outcome");
            Err(RunError::Stalled { tasks: ran })
        }
    }
}

/// Start `reaction` on `context`, returning a future of its outcome.
///
/// The reaction starts immediately, but only makes progress as `scheduler`
/// runs its deferred tasks. Pair it with [`LocalSpawn`](crate::LocalSpawn)
/// inside a `tokio::task::LocalSet`, or with a [`TaskQueue`] that is drained
/// between polls. If the reaction never resolves its continuation the future
/// never completes.
pub fn handle_async<R, C, T, E>(reaction: &R, context: C, scheduler: &Scheduler) -> Reacted<T, E>
where
    R: Reaction<C, T, E> + ?Sized,
    T: 'static,
    E: 'static,
{
    let shared = Rc::new(RefCell::new(Pending {
        outcome: None,
        waker: None,
    }));
    let sink = Rc::clone(&shared);
    let done = Done::new(scheduler, move |outcome| {
        let waker = {
            let mut pending = sink.borrow_mut();
            pending.outcome = Some(outcome);
            pending.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    });
    reaction.react(context, done);
    Reacted { shared }
}

struct Pending<T, E> {
    outcome: Option<Result<T, E>>,
    waker: Option<Waker>,
}

/// Future returned by [`handle_async`].
pub struct Reacted<T, E> {
    shared: Rc<RefCell<Pending<T, E>>>,
}

impl<T, E> Reacted<T, E> {
    /// Whether the outcome has arrived.
    pub fn is_ready(&self) -> bool {
        self.shared.borrow().outcome.is_some()
    }
}

impl<T, E> Future for Reacted<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut pending = self.shared.borrow_mut();
        match pending.outcome.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                pending.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
