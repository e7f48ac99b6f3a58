//! Looping and folding.
//!
//! [`repeat_while`] re-runs a body for as long as a condition holds, [`reduce`]
//! folds a sequence through a step reaction left to right, and [`map_hash`]
//! maps the values of a hash map by folding over its entries. Each iteration
//! resumes from a deferred continuation, so loops of any length run in
//! constant stack space.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::build::from_fn;
use crate::{Done, Reaction, SharedReaction};

/// The context a [`reduce`] step receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold<A, I> {
    /// Accumulator so far.
    pub acc: A,
    /// Next item to fold in.
    pub current: I,
}

/// Run `body` for as long as `condition` reports `true`.
///
/// Both receive the same context on every iteration; share mutable state
/// through the context (an `Rc<RefCell<_>>`, say). Reports the context once
/// `condition` reports `false`, or the first error from either reaction.
///
/// ```rust
/// use reactions::prelude::*;
/// use std::{cell::Cell, rc::Rc};
///
/// let below_three = from_fn(|n: Rc<Cell<u8>>, done: Done<bool, ()>| done.ok(n.get() < 3)).shared();
/// let bump = from_fn(|n: Rc<Cell<u8>>, done: Done<(), ()>| {
///     n.set(n.get() + 1);
///     done.ok(())
/// })
/// .shared();
///
/// let counter = Rc::new(Cell::new(0));
/// let looped = handle(&make::repeat_while(below_three, bump), Rc::clone(&counter)).unwrap();
/// assert!(looped.is_ok());
/// assert_eq!(counter.get(), 3);
/// ```
pub fn repeat_while<C, B, E>(
    condition: SharedReaction<C, bool, E>,
    body: SharedReaction<C, B, E>,
    context: C,
    done: Done<C, E>,
) where
    C: Clone + 'static,
    B: 'static,
    E: 'static,
{
    let check = Rc::clone(&condition);
    check.react(
        context.clone(),
        Done::guard(done, move |holds: bool, done| {
            if !holds {
                return done.ok(context);
            }
            let run = Rc::clone(&body);
            run.react(
                context.clone(),
                Done::guard(done, move |_, done| repeat_while(condition, body, context, done)),
            );
        }),
    );
}

/// Fold `items` left to right through `step`.
///
/// `step` receives a [`Fold`] of the accumulator so far and the next item,
/// and reports the next accumulator. Stops at the first error; reports
/// `initial` untouched when there are no items.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let sum = from_fn(|fold: Fold<u32, u32>, done: Done<u32, ()>| done.ok(fold.acc + fold.current)).shared();
/// assert_eq!(handle(&make::reduce(10, sum), vec![1, 2, 3]).unwrap(), Ok(16));
/// ```
pub fn reduce<A, I, E>(initial: A, step: SharedReaction<Fold<A, I>, A, E>, items: Vec<I>, done: Done<A, E>)
where
    A: 'static,
    I: 'static,
    E: 'static,
{
    fold_next(initial, step, items.into_iter(), done)
}

fn fold_next<A, I, E>(acc: A, step: SharedReaction<Fold<A, I>, A, E>, mut rest: std::vec::IntoIter<I>, done: Done<A, E>)
where
    A: 'static,
    I: 'static,
    E: 'static,
{
    let Some(current) = rest.next() else {
        return done.ok(acc);
    };
    let reaction = Rc::clone(&step);
    reaction.react(
        Fold { acc, current },
        Done::guard(done, move |acc, done| fold_next(acc, step, rest, done)),
    );
}

/// Map every value of `hash` through `reaction`, keeping the keys.
///
/// Entries are visited one at a time, each exactly once, in no particular
/// order. Stops at the first error.
///
/// ```rust
/// use reactions::prelude::*;
/// use std::collections::HashMap;
///
/// let negate = from_fn(|n: i32, done: Done<i32, ()>| done.ok(-n)).shared();
/// let hash = HashMap::from([("a", 5), ("b", 6)]);
///
/// let negated = handle(&make::map_hash(negate), hash).unwrap();
/// assert_eq!(negated, Ok(HashMap::from([("a", -5), ("b", -6)])));
/// ```
pub fn map_hash<K, V, U, E>(reaction: SharedReaction<V, U, E>, hash: HashMap<K, V>, done: Done<HashMap<K, U>, E>)
where
    K: Eq + Hash + 'static,
    V: 'static,
    U: 'static,
    E: 'static,
{
    if hash.is_empty() {
        return done.ok(HashMap::new());
    }

    let initial = HashMap::with_capacity(hash.len());
    let entry = from_fn(move |fold: Fold<HashMap<K, U>, (K, V)>, done: Done<HashMap<K, U>, E>| {
        let Fold {
            acc: mut mapped,
            current: (key, value),
        } = fold;
        reaction.react(
            value,
            Done::fast_guard(done, move |result, done| {
                mapped.insert(key, result);
                done.ok(mapped)
            }),
        );
    })
    .shared();

    reduce(initial, entry, hash.into_iter().collect(), done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Journal, TestError, delayed, failing, settle};
    use std::cell::Cell;

    fn countdown(journal: &Journal) -> (SharedReaction<Rc<Cell<u32>>, bool, TestError>, SharedReaction<Rc<Cell<u32>>, (), TestError>) {
        let condition = {
            let journal = journal.clone();
            from_fn(move |n: Rc<Cell<u32>>, done: Done<bool, TestError>| {
                journal.record(format!("check({})", n.get()));
                done.ok(n.get() > 0)
            })
            .shared()
        };
        let body = {
            let journal = journal.clone();
            from_fn(move |n: Rc<Cell<u32>>, done: Done<(), TestError>| {
                journal.record(format!("body({})", n.get()));
                n.set(n.get() - 1);
                done.ok(())
            })
            .shared()
        };
        (condition, body)
    }

    #[test]
    fn test_repeat_while_runs_body_until_condition_fails() {
        let journal = Journal::default();
        let (condition, body) = countdown(&journal);
        let counter = Rc::new(Cell::new(3));

        let outcome = settle(|done| repeat_while(condition, body, Rc::clone(&counter), done));

        assert!(matches!(outcome, Some(Ok(ref n)) if Rc::ptr_eq(n, &counter)));
        assert_eq!(counter.get(), 0);
        assert_eq!(journal.count("check"), 4);
        assert_eq!(journal.count("body"), 3);
    }

    #[test]
    fn test_repeat_while_false_at_once() {
        let journal = Journal::default();
        let (condition, body) = countdown(&journal);

        let outcome = settle(|done| repeat_while(condition, body, Rc::new(Cell::new(0)), done));

        assert!(matches!(outcome, Some(Ok(_))));
        assert_eq!(journal.entries(), vec!["check(0)"]);
    }

    #[test]
    fn test_repeat_while_condition_error() {
        let journal = Journal::default();
        let (_, body) = countdown(&journal);
        let condition = failing::<Rc<Cell<u32>>, bool>(&journal, "check", "cannot check");

        let outcome = settle(|done| repeat_while(condition, body, Rc::new(Cell::new(2)), done));

        assert!(matches!(outcome, Some(Err("cannot check"))));
        assert_eq!(journal.count("body"), 0);
    }

    #[test]
    fn test_repeat_while_body_error() {
        let journal = Journal::default();
        let (condition, _) = countdown(&journal);
        let body = failing::<Rc<Cell<u32>>, ()>(&journal, "body", "body broke");

        let outcome = settle(|done| repeat_while(condition, body, Rc::new(Cell::new(2)), done));

        assert!(matches!(outcome, Some(Err("body broke"))));
        assert_eq!(journal.count("check"), 1);
    }

    #[test]
    fn test_repeat_while_many_iterations() {
        let condition = from_fn(|n: Rc<Cell<u32>>, done: Done<bool, TestError>| done.ok(n.get() < 30_000)).shared();
        let body = from_fn(|n: Rc<Cell<u32>>, done: Done<(), TestError>| {
            n.set(n.get() + 1);
            done.ok(())
        })
        .shared();
        let counter = Rc::new(Cell::new(0));

        let outcome = settle(|done| repeat_while(condition, body, Rc::clone(&counter), done));
        assert!(matches!(outcome, Some(Ok(_))));
        assert_eq!(counter.get(), 30_000);
    }

    fn concat() -> SharedReaction<Fold<String, char>, String, TestError> {
        from_fn(|fold: Fold<String, char>, done: Done<String, TestError>| {
            let Fold { mut acc, current } = fold;
            acc.push(current);
            done.ok(acc)
        })
        .shared()
    }

    #[test]
    fn test_reduce_folds_left_to_right() {
        let outcome = settle(|done| reduce(">".to_string(), concat(), vec!['a', 'b', 'c'], done));
        assert_eq!(outcome, Some(Ok(">abc".to_string())));
    }

    #[test]
    fn test_reduce_empty_reports_initial() {
        let outcome = settle(|done| reduce("seed".to_string(), concat(), vec![], done));
        assert_eq!(outcome, Some(Ok("seed".to_string())));
    }

    #[test]
    fn test_reduce_stops_at_first_error() {
        let seen = Journal::default();
        let step = {
            let seen = seen.clone();
            from_fn(move |fold: Fold<u32, u32>, done: Done<u32, TestError>| {
                seen.record(format!("step({})", fold.current));
                if fold.current == 2 { done.err("two") } else { done.ok(fold.acc + fold.current) }
            })
            .shared()
        };

        assert_eq!(settle(|done| reduce(0, step, vec![1, 2, 3], done)), Some(Err("two")));
        assert_eq!(seen.entries(), vec!["step(1)", "step(2)"]);
    }

    #[test]
    fn test_reduce_waits_for_each_step() {
        let step = from_fn(|fold: Fold<Vec<u8>, u8>, done: Done<Vec<u8>, TestError>| {
            let Fold { mut acc, current } = fold;
            let scheduler = done.scheduler().clone();
            crate::testing::after_turns(&scheduler, usize::from(5 - current), move || {
                acc.push(current);
                done.ok(acc)
            });
        })
        .shared();

        assert_eq!(settle(|done| reduce(vec![], step, vec![1, 2, 3], done)), Some(Ok(vec![1, 2, 3])));
    }

    #[test]
    fn test_map_hash_keeps_keys() {
        let negate = from_fn(|n: i32, done: Done<i32, TestError>| done.ok(-n)).shared();
        let hash = HashMap::from([("a", 5), ("b", 6), ("c", 7)]);

        let outcome = settle(|done| map_hash(negate, hash, done));
        assert_eq!(outcome, Some(Ok(HashMap::from([("a", -5), ("b", -6), ("c", -7)]))));
    }

    #[test]
    fn test_map_hash_visits_each_entry_once() {
        let journal = Journal::default();
        let visit = {
            let journal = journal.clone();
            from_fn(move |n: u8, done: Done<u8, TestError>| {
                journal.record(format!("visit({n})"));
                done.ok(n)
            })
            .shared()
        };
        let hash: HashMap<u8, u8> = (0..10).map(|n| (n, n)).collect();

        let outcome = settle(|done| map_hash(visit, hash.clone(), done));
        assert_eq!(outcome, Some(Ok(hash)));
        let mut entries = journal.entries();
        entries.sort();
        entries.dedup();
        assert_eq!(entries.len(), 10);
        assert_eq!(journal.count("visit"), 10);
    }

    #[test]
    fn test_map_hash_with_slow_values() {
        let slow = delayed::<u8, &str>(2, Ok("done"));
        let hash = HashMap::from([(1, 1_u8), (2, 2)]);

        let outcome = settle(|done| map_hash(slow, hash, done));
        assert_eq!(outcome, Some(Ok(HashMap::from([(1, "done"), (2, "done")]))));
    }

    #[test]
    fn test_map_hash_error() {
        let journal = Journal::default();
        let broken = failing::<u8, u8>(&journal, "value", "bad value");
        let hash = HashMap::from([("x", 1_u8)]);

        assert_eq!(settle(|done| map_hash(broken, hash, done)), Some(Err("bad value")));
    }

    #[test]
    fn test_map_hash_empty() {
        let never = from_fn(|_: u8, _: Done<u8, TestError>| panic!("must not run")).shared();
        let outcome = settle(|done| map_hash(never, HashMap::<&str, u8>::new(), done));
        assert_eq!(outcome, Some(Ok(HashMap::new())));
    }

    #[test]
    fn test_reduce_many_items() {
        let count = from_fn(|fold: Fold<u64, u8>, done: Done<u64, TestError>| done.ok(fold.acc + u64::from(fold.current))).shared();

        assert_eq!(settle(|done| reduce(0, count, vec![1; 50_000], done)), Some(Ok(50_000)));
    }

    #[test]
    fn test_map_hash_many_entries() {
        let double = from_fn(|n: u32, done: Done<u32, TestError>| done.ok(n * 2)).shared();
        let hash: HashMap<u32, u32> = (0..30_000).map(|n| (n, n)).collect();

        let mapped = settle(|done| map_hash(double, hash, done)).and_then(Result::ok);
        let mapped = mapped.expect("mapping succeeds");
        assert_eq!(mapped.len(), 30_000);
        assert!(mapped.iter().all(|(key, value)| *value == key * 2));
    }
}
