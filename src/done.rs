//! Once-only continuations.
//!
//! A [`Done`] is the completion callback handed to every reaction. It may be
//! resolved exactly once, across all of its clones; a second resolution is a
//! broken reaction and panics before the first outcome has been dispatched.
//!
//! Guards built with [`Done::guard`] route an outcome: errors go straight to
//! the terminal continuation, successes go to a handler that decides how to
//! continue. Dispatch is either deferred to a later scheduler turn (the
//! default) or immediate for internal hot paths.
//!
//! ```rust
//! use reactions::{Done, TaskQueue};
//! use std::{cell::RefCell, rc::Rc};
//!
//! let queue = TaskQueue::new();
//! let seen = Rc::new(RefCell::new(None));
//!
//! let sink = Rc::clone(&seen);
//! let terminal: Done<i32, &str> = Done::new(&queue.scheduler(), move |outcome| {
//!     *sink.borrow_mut() = Some(outcome);
//! });
//! let doubled: Done<i32, &str> = Done::guard(terminal, |value, terminal| terminal.ok(value * 2));
//!
//! doubled.ok(21);
//! assert!(seen.borrow().is_none());
//!
//! queue.run_until_idle();
//! assert_eq!(*seen.borrow(), Some(Ok(42)));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::schedule::Scheduler;

type Handler<T, E> = Box<dyn FnOnce(Result<T, E>)>;

/// When a resolved continuation hands its outcome downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// On a later scheduler turn.
    #[default]
    Deferred,
    /// Synchronously, inside the call to `resolve`.
    Immediate,
}

/// Write-once flag.
#[derive(Debug, Default)]
pub(crate) struct Latch(Cell<bool>);

impl Latch {
    /// Sets the flag, returning `true` only for the call that set it.
    pub(crate) fn trip(&self) -> bool {
        !self.0.replace(true)
    }

    pub(crate) fn is_tripped(&self) -> bool {
        self.0.get()
    }
}

struct Guard<T, E> {
    scheduler: Scheduler,
    dispatch: Dispatch,
    invoked: Latch,
    handler: RefCell<Option<Handler<T, E>>>,
}

impl<T, E> Drop for Guard<T, E> {
    fn drop(&mut self) {
        if !self.invoked.is_tripped() {
            tracing::debug!("continuation dropped without being resolved");
        }
    }
}

/// Continuation reporting either a result `T` or an error `E`, exactly once.
///
/// Clones share the once-only latch: resolving any clone consumes the
/// continuation for all of them.
pub struct Done<T, E> {
    guard: Rc<Guard<T, E>>,
}

impl<T, E> Clone for Done<T, E> {
    fn clone(&self) -> Self {
        Self {
            guard: Rc::clone(&self.guard),
        }
    }
}

impl<T, E> fmt::Debug for Done<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("dispatch", &self.guard.dispatch)
            .field("invoked", &self.guard.invoked.is_tripped())
            .finish()
    }
}

impl<T, E> Done<T, E> {
    /// The scheduler deferred dispatch goes through.
    ///
    /// Continuations derived from this one inherit it.
    pub fn scheduler(&self) -> &Scheduler {
        &self.guard.scheduler
    }

    pub fn dispatch(&self) -> Dispatch {
        self.guard.dispatch
    }

    /// Whether this continuation (or any clone of it) has been resolved.
    pub fn is_invoked(&self) -> bool {
        self.guard.invoked.is_tripped()
    }
}

impl<T: 'static, E: 'static> Done<T, E> {
    /// A deferred continuation that hands its outcome to `handler`.
    pub fn new<F>(scheduler: &Scheduler, handler: F) -> Self
    where
        F: FnOnce(Result<T, E>) + 'static,
    {
        Self::with_dispatch(scheduler, Dispatch::Deferred, handler)
    }

    /// An immediate continuation that hands its outcome to `handler`.
    pub fn fast<F>(scheduler: &Scheduler, handler: F) -> Self
    where
        F: FnOnce(Result<T, E>) + 'static,
    {
        Self::with_dispatch(scheduler, Dispatch::Immediate, handler)
    }

    pub fn with_dispatch<F>(scheduler: &Scheduler, dispatch: Dispatch, handler: F) -> Self
    where
        F: FnOnce(Result<T, E>) + 'static,
    {
        Self {
            guard: Rc::new(Guard {
                scheduler: scheduler.clone(),
                dispatch,
                invoked: Latch::default(),
                handler: RefCell::new(Some(Box::new(handler))),
            }),
        }
    }

    /// Guard `terminal`: errors are forwarded to it unchanged, successes are
    /// handed to `on_success` together with `terminal`. Dispatch is deferred.
    pub fn guard<S, F>(terminal: Done<S, E>, on_success: F) -> Self
    where
        S: 'static,
        F: FnOnce(T, Done<S, E>) + 'static,
    {
        Self::route(Dispatch::Deferred, terminal, on_success)
    }

    /// [`guard`](Done::guard) with immediate dispatch.
    pub fn fast_guard<S, F>(terminal: Done<S, E>, on_success: F) -> Self
    where
        S: 'static,
        F: FnOnce(T, Done<S, E>) + 'static,
    {
        Self::route(Dispatch::Immediate, terminal, on_success)
    }

    /// Guard `terminal` with no success handler: the outcome reaches it as is.
    pub fn forward(terminal: Done<T, E>) -> Self {
        Self::guard(terminal, |value, terminal| terminal.ok(value))
    }

    fn route<S, F>(dispatch: Dispatch, terminal: Done<S, E>, on_success: F) -> Self
    where
        S: 'static,
        F: FnOnce(T, Done<S, E>) + 'static,
    {
        let scheduler = terminal.scheduler().clone();
        Self::with_dispatch(&scheduler, dispatch, move |outcome| match outcome {
            Ok(value) => on_success(value, terminal),
            Err(error) => terminal.err(error),
        })
    }

    /// Report the outcome.
    ///
    /// # Panics
    ///
    /// If this continuation, or any clone of it, was already resolved.
    pub fn resolve(self, outcome: Result<T, E>) {
        if !self.guard.invoked.trip() {
            panic!("continuation invoked more than once");
        }
        let Some(handler) = self.guard.handler.borrow_mut().take() else {
            return;
        };
        match self.guard.dispatch {
            Dispatch::Deferred => self.guard.scheduler.defer(move || handler(outcome)),
            Dispatch::Immediate => handler(outcome),
        }
    }

    /// Report success.
    pub fn ok(self, value: T) {
        self.resolve(Ok(value))
    }

    /// Report failure.
    pub fn err(self, error: E) {
        self.resolve(Err(error))
    }
}
