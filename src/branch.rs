//! Choosing a reaction at run time.
//!
//! [`switch`] runs a key reaction and dispatches on its result through a
//! [`ReactionMap`]; [`if_else`] is the two-way special case keyed on `bool`.
//! The chosen reaction receives the caller's own continuation, so its outcome
//! becomes the combinator's outcome. When nothing matches and there is no
//! fallback, the context is reported unchanged.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::{Done, SharedReaction};

/// Reactions keyed by a discriminant, with an optional fallback.
///
/// A key that is present always selects its own reaction; only a missing key
/// falls through to the fallback. Cheap to clone.
pub struct ReactionMap<K, C, T, E> {
    inner: Rc<Branches<K, C, T, E>>,
}

struct Branches<K, C, T, E> {
    entries: HashMap<K, SharedReaction<C, T, E>>,
    fallback: Option<SharedReaction<C, T, E>>,
}

impl<K: Eq + Hash, C, T, E> ReactionMap<K, C, T, E> {
    pub fn builder() -> ReactionMapBuilder<K, C, T, E> {
        ReactionMapBuilder::default()
    }

    /// The reaction for `key`, or the fallback when `key` is absent.
    pub fn select(&self, key: &K) -> Option<&SharedReaction<C, T, E>> {
        self.inner.entries.get(key).or(self.inner.fallback.as_ref())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.entries.contains_key(key)
    }

    pub fn has_fallback(&self) -> bool {
        self.inner.fallback.is_some()
    }

    /// Number of keyed entries, not counting the fallback.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}

impl<K, C, T, E> Clone for ReactionMap<K, C, T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: fmt::Debug, C, T, E> fmt::Debug for ReactionMap<K, C, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionMap")
            .field("keys", &self.inner.entries.keys().collect::<Vec<_>>())
            .field("fallback", &self.inner.fallback.is_some())
            .finish()
    }
}

impl<K: Eq + Hash, C, T, E> FromIterator<(K, SharedReaction<C, T, E>)> for ReactionMap<K, C, T, E> {
    fn from_iter<I: IntoIterator<Item = (K, SharedReaction<C, T, E>)>>(iter: I) -> Self {
        ReactionMapBuilder {
            entries: iter.into_iter().collect(),
            fallback: None,
        }
        .build()
    }
}

/// Builds a [`ReactionMap`].
///
/// ```rust
/// use reactions::prelude::*;
///
/// let greet = from_fn(|name: String, done: Done<String, ()>| done.ok(format!("hi {name}"))).shared();
/// let shrug = from_fn(|_: String, done: Done<String, ()>| done.ok("who?".to_string())).shared();
///
/// let map = ReactionMap::builder().on("friend", greet).otherwise(shrug).build();
/// assert!(map.contains_key(&"friend"));
/// assert!(map.has_fallback());
/// ```
pub struct ReactionMapBuilder<K, C, T, E> {
    entries: HashMap<K, SharedReaction<C, T, E>>,
    fallback: Option<SharedReaction<C, T, E>>,
}

impl<K, C, T, E> Default for ReactionMapBuilder<K, C, T, E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: None,
        }
    }
}

impl<K: Eq + Hash, C, T, E> ReactionMapBuilder<K, C, T, E> {
    /// Route `key` to `reaction`, replacing any earlier entry for it.
    pub fn on(mut self, key: K, reaction: SharedReaction<C, T, E>) -> Self {
        self.entries.insert(key, reaction);
        self
    }

    /// Route every absent key to `reaction`.
    pub fn otherwise(mut self, reaction: SharedReaction<C, T, E>) -> Self {
        self.fallback = Some(reaction);
        self
    }

    pub fn build(self) -> ReactionMap<K, C, T, E> {
        ReactionMap {
            inner: Rc::new(Branches {
                entries: self.entries,
                fallback: self.fallback,
            }),
        }
    }
}

/// Run `key`, then the reaction `reactions` selects for its result.
///
/// The selected reaction receives the original context and `done` itself.
/// Errors from `key` are reported without selecting anything; when no
/// reaction is selected the context is reported as the result.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let kind = from_fn(|n: i32, done: Done<&'static str, ()>| done.ok(if n < 0 { "neg" } else { "pos" })).shared();
/// let flip = from_fn(|n: i32, done: Done<i32, ()>| done.ok(-n)).shared();
/// let map = ReactionMap::builder().on("neg", flip).build();
///
/// assert_eq!(handle(&make::switch(kind.clone(), map.clone()), -4).unwrap(), Ok(4));
/// assert_eq!(handle(&make::switch(kind, map), 5).unwrap(), Ok(5));
/// ```
pub fn switch<C, K, T, E>(key: SharedReaction<C, K, E>, reactions: ReactionMap<K, C, T, E>, context: C, done: Done<T, E>)
where
    C: Clone + Into<T> + 'static,
    K: Eq + Hash + 'static,
    T: 'static,
    E: 'static,
{
    let original = context.clone();
    key.react(
        context,
        Done::guard(done, move |discriminant: K, done| match reactions.select(&discriminant) {
            Some(reaction) => reaction.react(original, done),
            None => {
                tracing::trace!("no branch selected, reporting context");
                done.ok(original.into())
            }
        }),
    );
}

/// Run `condition`, then `when_true` or `when_false` depending on its result.
///
/// A `None` branch reports the context unchanged.
pub fn if_else<C, T, E>(
    condition: SharedReaction<C, bool, E>,
    when_true: Option<SharedReaction<C, T, E>>,
    when_false: Option<SharedReaction<C, T, E>>,
    context: C,
    done: Done<T, E>,
) where
    C: Clone + Into<T> + 'static,
    T: 'static,
    E: 'static,
{
    let branches = [(true, when_true), (false, when_false)]
        .into_iter()
        .filter_map(|(key, branch)| branch.map(|reaction| (key, reaction)))
        .collect();
    switch(condition, branches, context, done)
}
