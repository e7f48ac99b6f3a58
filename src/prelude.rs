//! Commonly used imports
//!
//! Use `use reactions::prelude::*;` for quick access to the most common types and functions.
//! Combinators themselves are reached through [`make`] (pre-built) or the crate root.

// Core types
pub use crate::{Done, Reaction, Reactions, SharedReaction};

// Building reactions
pub use crate::build::{echo, from_fn};

// Combinator inputs
pub use crate::{Fold, ReactionMap};

// Pre-built combinators
pub use crate::make::{self, partial};

// Scheduling
pub use crate::schedule::{Scheduler, TaskQueue};

// Execution
pub use crate::{RunConfig, handle, handle_async, handle_with};
