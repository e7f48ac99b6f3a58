//! # Reactions: Composable Callback-Based Control Flow
//!
//! Compose asynchronous units of work that report through a once-only
//! continuation, and drive them on a single-threaded scheduler.
//!
//! ## Core Types
//!
//! - **[`Reaction<C, T, E>`]**: work over a context `C` that eventually reports `T` or `E`
//! - **[`Done<T, E>`]**: the continuation a reaction resolves, exactly once
//! - **[`Scheduler`]**: where continuations defer their dispatch
//!
//! ## Key Features
//!
//! - **Sequential**: [`series`], [`collect_series`], [`waterfall`], [`first`]
//! - **Concurrent**: [`parallel`], [`collect_parallel`], [`map`]
//! - **Branching**: [`if_else`], [`switch`]
//! - **Looping**: [`repeat_while`], [`reduce`], [`map_hash`]
//! - **Nesting**: every combinator is available pre-built in [`make`]
//! - **Stack safe**: sequential steps resume from the scheduler loop
//!
//! ## Example
//!
//! ```
//! use reactions::prelude::*;
//!
//! let fetch = from_fn(|id: u32, done: Done<String, String>| done.ok(format!("user-{id}"))).shared();
//! let users = handle(&make::map(fetch), vec![1, 2, 3]).unwrap();
//!
//! assert_eq!(users, Ok(vec!["user-1".to_string(), "user-2".to_string(), "user-3".to_string()]));
//! ```
//!
//! ## Execution
//!
//! - [`handle(reaction, context)`](handle) - run to completion on a private queue
//! - [`handle_with`] / [`handle_on`] - the same with a [`RunConfig`] budget or a caller-owned queue
//! - [`handle_async`] - a future of the outcome, for schedulers driven elsewhere

mod branch;
mod config;
mod done;
mod error;
mod handler;
mod iterate;
mod reaction;

pub mod build;
pub mod concurrent;
pub mod make;
pub mod prelude;
pub mod schedule;
pub mod sequential;

#[cfg(test)]
mod testing;

pub use branch::{ReactionMap, ReactionMapBuilder, if_else, switch};
pub use build::{FromFn, echo, from_fn};
pub use concurrent::{collect_parallel, map, parallel};
pub use config::RunConfig;
pub use done::{Dispatch, Done};
pub use error::RunError;
pub use handler::{Reacted, handle, handle_async, handle_on, handle_with};
pub use iterate::{Fold, map_hash, reduce, repeat_while};
pub use make::{Partial, partial};
pub use reaction::{Reaction, Reactions, SharedReaction};
#[cfg(feature = "tokio")]
pub use schedule::LocalSpawn;
pub use schedule::{Schedule, Scheduler, Task, TaskQueue};
pub use sequential::{collect_series, first, series, waterfall};
