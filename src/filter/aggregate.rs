use crate::filter::{Filter, FilterOutcome};
use crate::job::Presubmit;

/// Evaluates child filters in order and returns the first match.
///
/// Later filters are not consulted once one matches, so callers must add
/// the most specific filters first.
#[derive(Default)]
pub struct AggregateFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AggregateFilter {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    pub fn push(&mut self, filter: impl Filter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for AggregateFilter {
    fn evaluate(&self, presubmit: &Presubmit) -> FilterOutcome {
        self.filters
            .iter()
            .map(|filter| filter.evaluate(presubmit))
            .find(|outcome| outcome.matches)
            .unwrap_or(FilterOutcome::NO_MATCH)
    }
}

impl FromIterator<Box<dyn Filter>> for AggregateFilter {
    fn from_iter<I: IntoIterator<Item = Box<dyn Filter>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
