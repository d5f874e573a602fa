use std::sync::Arc;

use crate::eval::CheckContexts;
use crate::filter::{Filter, FilterOutcome};
use crate::job::Presubmit;

/// Selects jobs whose context failed, plus automatic jobs that never reported.
///
/// A failed job defaults to running when its conditions are inconclusive;
/// a job that simply never reported does not.
#[derive(Debug, Clone)]
pub struct RetestFilter {
    contexts: Arc<CheckContexts>,
}

impl RetestFilter {
    pub fn new(contexts: Arc<CheckContexts>) -> Self {
        Self { contexts }
    }
}

impl Filter for RetestFilter {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome {
        let failed = self.contexts.has_failed(&presubmit.context);
        let missing = !presubmit.needs_explicit_trigger()
            && !self.contexts.has_reported(&presubmit.context);
        if failed || missing {
            FilterOutcome::matched(false, failed)
        } else {
            FilterOutcome::NO_MATCH
        }
    }
}

/// [`RetestFilter`] restricted to required jobs.
#[derive(Debug, Clone)]
pub struct RetestRequiredFilter {
    retest: RetestFilter,
}

impl RetestRequiredFilter {
    pub fn new(contexts: Arc<CheckContexts>) -> Self {
        Self {
            retest: RetestFilter::new(contexts),
        }
    }
}

impl Filter for RetestRequiredFilter {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome {
        if presubmit.optional {
            return FilterOutcome::NO_MATCH;
        }
        self.retest.evaluate(presubmit)
    }
}
