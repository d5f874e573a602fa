use crate::filter::{Filter, FilterOutcome};
use crate::job::Presubmit;

/// Selects every job that does not need an explicit trigger.
///
/// Never forced: branch and path conditions still decide, defaulting to false.
/// Jobs whose own trigger matches `/test all` are picked up by the
/// [`CommandFilter`](crate::filter::CommandFilter) for the same comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestAllFilter;

impl Filter for TestAllFilter {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome {
        if presubmit.needs_explicit_trigger() {
            FilterOutcome::NO_MATCH
        } else {
            FilterOutcome::matched(false, false)
        }
    }
}
