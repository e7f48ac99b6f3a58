use crate::{Done, Reactions};

/// Run `reactions` in order, feeding each one the previous one's result.
///
/// The first reaction receives `context`. Stops at the first error; on success
/// reports the last result, or `context` itself when there are no reactions.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let add_one = from_fn(|n: i32, done: Done<i32, ()>| done.ok(n + 1)).shared();
/// let steps = Reactions::new(vec![add_one.clone(), add_one.clone(), add_one]);
///
/// assert_eq!(handle(&make::waterfall(steps), 0).unwrap(), Ok(3));
/// ```
pub fn waterfall<C, E>(reactions: Reactions<C, C, E>, context: C, done: Done<C, E>)
where
    C: 'static,
    E: 'static,
{
    cascade(reactions, 0, context, done)
}

fn cascade<C, E>(reactions: Reactions<C, C, E>, index: usize, context: C, done: Done<C, E>)
where
    C: 'static,
    E: 'static,
{
    let Some(reaction) = reactions.get(index).cloned() else {
        return done.ok(context);
    };
    reaction.react(
        context,
        Done::guard(done, move |next, done| cascade(reactions, index + 1, next, done)),
    );
}

/// Run `reactions` in order until one finds something.
///
/// Each reaction receives the original context. `Some(value)` ends the search
/// and is reported; `None` moves on to the next reaction; an error is reported
/// immediately. Reports `None` when every reaction comes up empty, including
/// when there are none.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let lookups: Reactions<&str, Option<u16>, ()> = vec![
///     from_fn(|_: &str, done: Done<Option<u16>, ()>| done.ok(None)).shared(),
///     from_fn(|host: &str, done: Done<Option<u16>, ()>| {
///         done.ok((host == "localhost").then_some(8080))
///     })
///     .shared(),
/// ]
/// .into();
///
/// assert_eq!(handle(&make::first(lookups), "localhost").unwrap(), Ok(Some(8080)));
/// ```
pub fn first<C, T, E>(reactions: Reactions<C, Option<T>, E>, context: C, done: Done<Option<T>, E>)
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    attempt(reactions, 0, context, done)
}

fn attempt<C, T, E>(reactions: Reactions<C, Option<T>, E>, index: usize, context: C, done: Done<Option<T>, E>)
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    let Some(reaction) = reactions.get(index).cloned() else {
        return done.ok(None);
    };
    reaction.react(
        context.clone(),
        Done::guard(done, move |found, done| match found {
            Some(value) => done.ok(Some(value)),
            None => attempt(reactions, index + 1, context, done),
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::from_fn;
    use crate::testing::{Journal, TestError, delayed, failing, reporting, settle};
    use crate::{Reaction, SharedReaction};

    fn add_one(journal: &Journal) -> SharedReaction<i32, i32, TestError> {
        let journal = journal.clone();
        from_fn(move |n: i32, done: Done<i32, TestError>| {
            journal.record(format!("add_one({n})"));
            done.ok(n + 1)
        })
        .shared()
    }

    #[test]
    fn test_waterfall_threads_results() {
        let journal = Journal::default();
        let step = add_one(&journal);
        let reactions: Reactions<i32, i32, TestError> = vec![step.clone(), step.clone(), step].into();

        assert_eq!(settle(|done| waterfall(reactions, 0, done)), Some(Ok(3)));
        assert_eq!(journal.entries(), vec!["add_one(0)", "add_one(1)", "add_one(2)"]);
    }

    #[test]
    fn test_waterfall_stops_at_first_error() {
        let journal = Journal::default();
        let reactions: Reactions<i32, i32, TestError> = vec![
            add_one(&journal),
            failing(&journal, "fail", "nope"),
            add_one(&journal),
        ]
        .into();

        assert_eq!(settle(|done| waterfall(reactions, 10, done)), Some(Err("nope")));
        assert_eq!(journal.entries(), vec!["add_one(10)", "fail(11)"]);
    }

    #[test]
    fn test_waterfall_empty_reports_context() {
        let reactions: Reactions<i32, i32, TestError> = Reactions::default();
        assert_eq!(settle(|done| waterfall(reactions, 5, done)), Some(Ok(5)));
    }

    #[test]
    fn test_waterfall_deep_chain() {
        let step = from_fn(|n: u64, done: Done<u64, TestError>| done.ok(n + 2)).shared();
        let reactions: Reactions<u64, u64, TestError> = (0..50_000).map(|_| step.clone()).collect();

        assert_eq!(settle(|done| waterfall(reactions, 0, done)), Some(Ok(100_000)));
    }

    #[test]
    fn test_first_returns_first_found() {
        let journal = Journal::default();
        let reactions: Reactions<u8, Option<&str>, TestError> = vec![
            reporting(&journal, "miss", None),
            reporting(&journal, "hit", Some("found")),
            reporting(&journal, "never", Some("late")),
        ]
        .into();

        assert_eq!(settle(|done| first(reactions, 1, done)), Some(Ok(Some("found"))));
        assert_eq!(journal.entries(), vec!["miss(1)", "hit(1)"]);
    }

    #[test]
    fn test_first_reports_none_when_exhausted() {
        let journal = Journal::default();
        let reactions: Reactions<u8, Option<u8>, TestError> = vec![
            reporting(&journal, "a", None),
            delayed(2, Ok(None)),
            reporting(&journal, "c", None),
        ]
        .into();

        assert_eq!(settle(|done| first(reactions, 0, done)), Some(Ok(None)));
        assert_eq!(journal.count("a") + journal.count("c"), 2);
    }

    #[test]
    fn test_first_stops_on_error() {
        let journal = Journal::default();
        let reactions: Reactions<u8, Option<u8>, TestError> = vec![
            reporting(&journal, "a", None),
            failing(&journal, "b", "broken"),
            reporting(&journal, "c", Some(1)),
        ]
        .into();

        assert_eq!(settle(|done| first(reactions, 0, done)), Some(Err("broken")));
        assert_eq!(journal.count("c"), 0);
    }

    #[test]
    fn test_first_empty_reports_none() {
        let reactions: Reactions<u8, Option<u8>, TestError> = Reactions::default();
        assert_eq!(settle(|done| first(reactions, 0, done)), Some(Ok(None)));
    }

    #[test]
    fn test_first_passes_original_context_to_each() {
        let journal = Journal::default();
        let lookup = |name: &'static str| {
            let journal = journal.clone();
            from_fn(move |ctx: String, done: Done<Option<String>, TestError>| {
                journal.record(format!("{name}({ctx})"));
                done.ok(None)
            })
            .shared()
        };
        let reactions: Reactions<String, Option<String>, TestError> = vec![lookup("x"), lookup("y")].into();

        let outcome = settle(|done| first(reactions, "same".to_string(), done));
        assert_eq!(outcome, Some(Ok(None)));
        assert_eq!(journal.entries(), vec!["x(same)", "y(same)"]);
    }

    #[test]
    fn test_first_long_run_of_misses() {
        let miss = from_fn(|_: u8, done: Done<Option<u8>, TestError>| done.ok(None)).shared();
        let mut reactions: Vec<_> = (0..50_000).map(|_| miss.clone()).collect();
        reactions.push(from_fn(|n: u8, done: Done<Option<u8>, TestError>| done.ok(Some(n))).shared());

        assert_eq!(settle(|done| first(reactions.into(), 7, done)), Some(Ok(Some(7))));
    }
}
