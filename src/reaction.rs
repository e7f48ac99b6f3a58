//! Core trait for asynchronous units of work.
//!
//! A [`Reaction`] receives a context value and a [`Done`] continuation, and must
//! eventually resolve the continuation exactly once, either synchronously or
//! from further deferred work. Every combinator in this crate consumes
//! reactions, and every combinator can itself be packaged as one (see
//! [`make`](crate::make)), so they nest freely.
//!
//! # Examples
//!
//! ```rust
//! use reactions::prelude::*;
//!
//! let double = from_fn(|n: i32, done: Done<i32, String>| done.ok(n * 2));
//! assert_eq!(handle(&double, 21).unwrap(), Ok(42));
//! ```

use std::rc::Rc;

use either::Either;

use crate::done::Done;

/// An asynchronous unit of work over a context `C`, reporting `T` or `E`.
pub trait Reaction<C, T, E> {
    /// Start the work. `done` must be resolved exactly once.
    fn react(&self, context: C, done: Done<T, E>);

    /// Type-erase into a [`SharedReaction`].
    fn shared(self) -> SharedReaction<C, T, E>
    where
        Self: Sized + 'static,
    {
        Rc::new(self)
    }
}

/// Reference-counted, type-erased reaction.
///
/// Combinators hold on to their reactions across scheduler turns, and
/// pre-built combinators may be invoked many times, so reactions are shared
/// rather than owned.
pub type SharedReaction<C, T, E> = Rc<dyn Reaction<C, T, E>>;

impl<C, T, E, R> Reaction<C, T, E> for Rc<R>
where
    R: Reaction<C, T, E> + ?Sized,
{
    fn react(&self, context: C, done: Done<T, E>) {
        (**self).react(context, done)
    }
}

impl<C, T, E, R> Reaction<C, T, E> for Box<R>
where
    R: Reaction<C, T, E> + ?Sized,
{
    fn react(&self, context: C, done: Done<T, E>) {
        (**self).react(context, done)
    }
}

impl<C, T, E, L, R> Reaction<C, T, E> for Either<L, R>
where
    L: Reaction<C, T, E>,
    R: Reaction<C, T, E>,
{
    fn react(&self, context: C, done: Done<T, E>) {
        match self {
            Either::Left(l) => l.react(context, done),
            Either::Right(r) => r.react(context, done),
        }
    }
}

/// `None` stands in for a missing reaction and reports its context unchanged.
impl<C, T, E, R> Reaction<C, T, E> for Option<R>
where
    R: Reaction<C, T, E>,
    C: Into<T>,
    T: 'static,
    E: 'static,
{
    fn react(&self, context: C, done: Done<T, E>) {
        match self {
            Some(r) => r.react(context, done),
            None => done.ok(context.into()),
        }
    }
}

/// An ordered, immutable collection of reactions.
///
/// Cheap to clone; order decides execution order for the sequential
/// combinators and result slots for the fan-out ones.
pub struct Reactions<C, T, E> {
    items: Rc<[SharedReaction<C, T, E>]>,
}

impl<C, T, E> Reactions<C, T, E> {
    pub fn new(items: Vec<SharedReaction<C, T, E>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SharedReaction<C, T, E>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SharedReaction<C, T, E>> {
        self.items.iter()
    }
}

impl<C, T, E> Clone for Reactions<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<C, T, E> Default for Reactions<C, T, E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<C, T, E> From<Vec<SharedReaction<C, T, E>>> for Reactions<C, T, E> {
    fn from(items: Vec<SharedReaction<C, T, E>>) -> Self {
        Self::new(items)
    }
}

impl<C, T, E> FromIterator<SharedReaction<C, T, E>> for Reactions<C, T, E> {
    fn from_iter<I: IntoIterator<Item = SharedReaction<C, T, E>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, C, T, E> IntoIterator for &'a Reactions<C, T, E> {
    type Item = &'a SharedReaction<C, T, E>;
    type IntoIter = std::slice::Iter<'a, SharedReaction<C, T, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
