use crate::{Done, Reaction};

/// A reaction backed by a closure. Created via [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<C, T, E, F> Reaction<C, T, E> for FromFn<F>
where
    F: Fn(C, Done<T, E>),
{
    fn react(&self, context: C, done: Done<T, E>) {
        (self.0)(context, done)
    }
}

/// Create a reaction from a closure.
///
/// The closure may be called many times, once per invocation of the reaction,
/// and must resolve the continuation it is given exactly once.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let shout = from_fn(|name: String, done: Done<String, ()>| done.ok(name.to_uppercase()));
/// assert_eq!(handle(&shout, "hey".to_string()).unwrap(), Ok("HEY".to_string()));
/// ```
pub fn from_fn<C, T, E, F>(f: F) -> FromFn<F>
where
    F: Fn(C, Done<T, E>),
{
    FromFn(f)
}

/// Report the context unchanged.
///
/// ```rust
/// use reactions::prelude::*;
///
/// let identity = from_fn(echo::<u8, ()>);
/// assert_eq!(handle(&identity, 7).unwrap(), Ok(7));
/// ```
pub fn echo<C: 'static, E: 'static>(context: C, done: Done<C, E>) {
    done.ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::settle;

    #[test]
    fn test_from_fn_runs_closure_per_invocation() {
        let calls = std::cell::Cell::new(0);
        let counting = from_fn(|n: u32, done: Done<u32, &'static str>| {
            calls.set(calls.get() + 1);
            done.ok(n + 1)
        });

        assert_eq!(settle(|done| counting.react(1, done)), Some(Ok(2)));
        assert_eq!(settle(|done| counting.react(5, done)), Some(Ok(6)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_echo_reports_context() {
        assert_eq!(settle(|done| echo::<_, &'static str>("ctx", done)), Some(Ok("ctx")));
    }

    #[test]
    fn test_echo_is_repeatable() {
        let first = settle(|done| echo::<_, &'static str>(vec![1, 2], done));
        let second = settle(|done| echo::<_, &'static str>(vec![1, 2], done));
        assert_eq!(first, second);
    }
}
