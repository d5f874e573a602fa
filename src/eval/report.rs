use std::collections::BTreeSet;

use serde::Serialize;

use crate::job::Presubmit;

/// Counters gathered while filtering, for logs and callers that report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub total_count: usize,
    pub to_trigger_count: usize,
    pub no_match_count: usize,
    pub should_not_run_count: usize,
    /// Names of triggered jobs, in input order.
    pub to_trigger: Vec<String>,
}

/// Jobs selected by one evaluation pass, in input order.
#[derive(Debug)]
pub struct Filtered<'a> {
    pub to_trigger: Vec<&'a Presubmit>,
    pub report: FilterReport,
}

impl Filtered<'_> {
    pub fn names(&self) -> &[String] {
        &self.report.to_trigger
    }
}

/// What a change could run, split by how it is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailablePresubmits {
    /// Jobs `/test all` would run.
    pub run_with_test_all: BTreeSet<String>,
    /// Rerun commands of optional jobs.
    pub optional: BTreeSet<String>,
    /// Rerun commands of required jobs.
    pub required: BTreeSet<String>,
}
