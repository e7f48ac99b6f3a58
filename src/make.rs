//! Pre-built combinators.
//!
//! Every combinator in this crate takes its configuration followed by a
//! context and a continuation. The functions here take just the
//! configuration and return a [`Partial`]: a [`Reaction`] that runs the
//! combinator with whatever context it is later given. That is what lets
//! combinators nest inside one another.
//!
//! ```rust
//! use reactions::prelude::*;
//!
//! let add = |k: i32| from_fn(move |n: i32, done: Done<i32, ()>| done.ok(n + k)).shared();
//!
//! // a waterfall whose middle step is itself a waterfall
//! let inner = make::waterfall(Reactions::new(vec![add(10), add(100)])).shared();
//! let outer = make::waterfall(Reactions::new(vec![add(1), inner, add(1000)]));
//!
//! assert_eq!(handle(&outer, 0).unwrap(), Ok(1111));
//! assert_eq!(handle(&outer, 5).unwrap(), Ok(1116));
//! ```
//!
//! For [`map`], [`reduce`] and [`map_hash`] the context is the collection
//! being processed.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::{Done, Fold, Reaction, ReactionMap, Reactions, SharedReaction};

/// A combinator with its configuration captured.
///
/// The configuration is cloned for each invocation, so a `Partial` can be run
/// any number of times, including concurrently.
pub struct Partial<A, C, T, E> {
    args: A,
    combinator: fn(A, C, Done<T, E>),
}

impl<A, C, T, E> Partial<A, C, T, E> {
    pub fn new(args: A, combinator: fn(A, C, Done<T, E>)) -> Self {
        Self { args, combinator }
    }

    /// The captured configuration.
    pub fn args(&self) -> &A {
        &self.args
    }
}

impl<A: Clone, C, T, E> Partial<A, C, T, E> {
    /// Run the combinator on `context`.
    pub fn invoke(&self, context: C, done: Done<T, E>) {
        (self.combinator)(self.args.clone(), context, done)
    }
}

impl<A: Clone, C, T, E> Clone for Partial<A, C, T, E> {
    fn clone(&self) -> Self {
        Self {
            args: self.args.clone(),
            combinator: self.combinator,
        }
    }
}

impl<A: fmt::Debug, C, T, E> fmt::Debug for Partial<A, C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partial").field("args", &self.args).finish_non_exhaustive()
    }
}

impl<A: Clone, C, T, E> Reaction<C, T, E> for Partial<A, C, T, E> {
    fn react(&self, context: C, done: Done<T, E>) {
        self.invoke(context, done)
    }
}

/// Capture `args` for `combinator`.
///
/// ```rust
/// use reactions::prelude::*;
///
/// fn repeat_ok(times: usize, word: String, done: Done<String, ()>) {
///     done.ok(word.repeat(times))
/// }
///
/// let thrice = partial(3, repeat_ok);
/// assert_eq!(handle(&thrice, "la".to_string()).unwrap(), Ok("lalala".to_string()));
/// ```
pub fn partial<A, C, T, E>(args: A, combinator: fn(A, C, Done<T, E>)) -> Partial<A, C, T, E> {
    Partial::new(args, combinator)
}

/// Pre-built [`series`](crate::series).
pub fn series<C, T, E>(reactions: Reactions<C, T, E>) -> Partial<Reactions<C, T, E>, C, C, E>
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    partial(reactions, crate::series)
}

/// Pre-built [`collect_series`](crate::collect_series).
pub fn collect_series<C, T, E>(reactions: Reactions<C, T, E>) -> Partial<Reactions<C, T, E>, C, Vec<T>, E>
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    partial(reactions, crate::collect_series)
}

/// Pre-built [`parallel`](crate::parallel).
pub fn parallel<C, T, E>(reactions: Reactions<C, T, E>) -> Partial<Reactions<C, T, E>, C, C, E>
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    partial(reactions, crate::parallel)
}

/// Pre-built [`collect_parallel`](crate::collect_parallel).
pub fn collect_parallel<C, T, E>(reactions: Reactions<C, T, E>) -> Partial<Reactions<C, T, E>, C, Vec<T>, E>
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    partial(reactions, crate::collect_parallel)
}

/// Pre-built [`waterfall`](crate::waterfall).
pub fn waterfall<C, E>(reactions: Reactions<C, C, E>) -> Partial<Reactions<C, C, E>, C, C, E>
where
    C: 'static,
    E: 'static,
{
    partial(reactions, crate::waterfall)
}

/// Pre-built [`first`](crate::first).
pub fn first<C, T, E>(
    reactions: Reactions<C, Option<T>, E>,
) -> Partial<Reactions<C, Option<T>, E>, C, Option<T>, E>
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    partial(reactions, crate::first)
}

/// Configuration captured by [`if_else`].
pub type IfElseArgs<C, T, E> = (
    SharedReaction<C, bool, E>,
    Option<SharedReaction<C, T, E>>,
    Option<SharedReaction<C, T, E>>,
);

/// Pre-built [`if_else`](crate::if_else).
pub fn if_else<C, T, E>(
    condition: SharedReaction<C, bool, E>,
    when_true: Option<SharedReaction<C, T, E>>,
    when_false: Option<SharedReaction<C, T, E>>,
) -> Partial<IfElseArgs<C, T, E>, C, T, E>
where
    C: Clone + Into<T> + 'static,
    T: 'static,
    E: 'static,
{
    partial((condition, when_true, when_false), |(condition, when_true, when_false), context, done| {
        crate::if_else(condition, when_true, when_false, context, done)
    })
}

/// Pre-built [`switch`](crate::switch).
pub fn switch<C, K, T, E>(
    key: SharedReaction<C, K, E>,
    reactions: ReactionMap<K, C, T, E>,
) -> Partial<(SharedReaction<C, K, E>, ReactionMap<K, C, T, E>), C, T, E>
where
    C: Clone + Into<T> + 'static,
    K: Eq + Hash + 'static,
    T: 'static,
    E: 'static,
{
    partial((key, reactions), |(key, reactions), context, done| {
        crate::switch(key, reactions, context, done)
    })
}

/// Pre-built [`repeat_while`](crate::repeat_while).
pub fn repeat_while<C, B, E>(
    condition: SharedReaction<C, bool, E>,
    body: SharedReaction<C, B, E>,
) -> Partial<(SharedReaction<C, bool, E>, SharedReaction<C, B, E>), C, C, E>
where
    C: Clone + 'static,
    B: 'static,
    E: 'static,
{
    partial((condition, body), |(condition, body), context, done| {
        crate::repeat_while(condition, body, context, done)
    })
}

/// Pre-built [`map`](crate::map). The items to map are the context.
pub fn map<I, T, E>(reaction: SharedReaction<I, T, E>) -> Partial<SharedReaction<I, T, E>, Vec<I>, Vec<T>, E>
where
    I: 'static,
    T: 'static,
    E: 'static,
{
    partial(reaction, crate::map)
}

/// Pre-built [`reduce`](crate::reduce). The items to fold are the context.
pub fn reduce<A, I, E>(
    initial: A,
    step: SharedReaction<Fold<A, I>, A, E>,
) -> Partial<(A, SharedReaction<Fold<A, I>, A, E>), Vec<I>, A, E>
where
    A: Clone + 'static,
    I: 'static,
    E: 'static,
{
    partial((initial, step), |(initial, step), items, done| {
        crate::reduce(initial, step, items, done)
    })
}

/// Pre-built [`map_hash`](crate::map_hash). The map is the context.
pub fn map_hash<K, V, U, E>(
    reaction: SharedReaction<V, U, E>,
) -> Partial<SharedReaction<V, U, E>, HashMap<K, V>, HashMap<K, U>, E>
where
    K: Eq + Hash + 'static,
    V: 'static,
    U: 'static,
    E: 'static,
{
    partial(reaction, crate::map_hash)
}
