use crate::{Done, Reactions};

/// Run `reactions` in order, each with the original context, collecting their
/// results.
///
/// Stops at the first error and reports it; later reactions never start. On
/// success reports every result, in input order.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let steps: Reactions<u32, u32, ()> = vec![
///     from_fn(|n: u32, done: Done<u32, ()>| done.ok(n + 1)).shared(),
///     from_fn(|n: u32, done: Done<u32, ()>| done.ok(n * 10)).shared(),
/// ]
/// .into();
///
/// let collected = handle(&make::collect_series(steps), 3).unwrap();
/// assert_eq!(collected, Ok(vec![4, 30]));
/// ```
pub fn collect_series<C, T, E>(reactions: Reactions<C, T, E>, context: C, done: Done<Vec<T>, E>)
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    let results = Vec::with_capacity(reactions.len());
    Series {
        reactions,
        context,
        index: 0,
        results,
    }
    .advance(done);
}

/// Run `reactions` in order, each with the original context.
///
/// Stops at the first error and reports it; on success reports the context.
/// Reaction results are discarded.
pub fn series<C, T, E>(reactions: Reactions<C, T, E>, context: C, done: Done<C, E>)
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    let original = context.clone();
    collect_series(
        reactions,
        context,
        Done::fast_guard(done, move |_, done| done.ok(original)),
    );
}

/// Progress through a sequence of reactions.
struct Series<C, T, E> {
    reactions: Reactions<C, T, E>,
    context: C,
    index: usize,
    results: Vec<T>,
}

impl<C, T, E> Series<C, T, E>
where
    C: Clone + 'static,
    T: 'static,
    E: 'static,
{
    fn advance(mut self, done: Done<Vec<T>, E>) {
        let Some(reaction) = self.reactions.get(self.index).cloned() else {
            return done.ok(self.results);
        };
        reaction.react(
            self.context.clone(),
            Done::guard(done, move |value, done| {
                self.results.push(value);
                self.index += 1;
                self.advance(done);
            }),
        );
    }
}
