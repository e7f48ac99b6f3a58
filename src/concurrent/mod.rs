//! Run reactions concurrently
//!
//! Fan-out combinators start every reaction before awaiting any of them and
//! slot each result by its original index, whatever order they finish in. The
//! first error is reported at once; results arriving after that are dropped.

mod fan_out;

pub use fan_out::{collect_parallel, map, parallel};
