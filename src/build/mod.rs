//! Building reactions from scratch
//!
//! This module provides the closure adapter every hand-written reaction goes
//! through, plus the identity reaction.

mod func;

pub use func::{FromFn, echo, from_fn};
