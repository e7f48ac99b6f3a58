//! Run reactions one after another
//!
//! Each combinator here starts a reaction only after the previous one's
//! continuation has fired, and stops at the first error. Every step resumes
//! from a deferred continuation, i.e. from the scheduler's own loop, so the
//! length of a chain never deepens the call stack.

mod series;
mod waterfall;

pub use series::{collect_series, series};
pub use waterfall::{first, waterfall};
