use crate::filter::{Filter, FilterOutcome};
use crate::job::Presubmit;

/// Selects jobs whose trigger appears in the comment body.
///
/// An explicit request always runs the job: the outcome is forced and
/// defaults to true.
#[derive(Debug, Clone)]
pub struct CommandFilter {
    body: String,
}

impl CommandFilter {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Filter for CommandFilter {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome {
        if presubmit.trigger_matches(&self.body) {
            FilterOutcome::matched(true, true)
        } else {
            FilterOutcome::NO_MATCH
        }
    }
}
