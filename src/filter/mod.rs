//! Filters: predicates deciding which presubmits a comment selects.
//!
//! Each filter looks at one presubmit and reports a [`FilterOutcome`].
//! Filters compose with [`AggregateFilter`], where the first match wins,
//! so the order in which they are added sets their precedence.

/// First-match-wins composition of filters.
pub mod aggregate;
/// `/test <job>`: the job's own trigger.
pub mod command;
/// Outcome value returned by every filter.
pub mod outcome;
/// `/retest` and `/retest-required`: rerun failed or missing contexts.
pub mod retest;
/// `/test all`: every job that runs automatically.
pub mod test_all;

pub use aggregate::AggregateFilter;
pub use command::CommandFilter;
pub use outcome::FilterOutcome;
pub use retest::{RetestFilter, RetestRequiredFilter};
pub use test_all::TestAllFilter;

use crate::job::Presubmit;

/// A predicate over presubmit configuration.
pub trait Filter: Send + Sync {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome;
}

impl<T: Filter + ?Sized> Filter for Box<T> {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome {
        (**self).evaluate(presubmit)
    }
}
