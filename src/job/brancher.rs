//! Branch scoping for presubmits.

use regex::Regex;

use crate::error::Result;

/// Branch allow/deny lists, each compiled into one anchored alternation.
///
/// `skip_branches` wins over `branches`. An empty `branches` list means
/// every branch not skipped is in scope.
#[derive(Debug, Clone, Default)]
pub struct Brancher {
    branches: Option<Regex>,
    skip_branches: Option<Regex>,
}

fn alternation(job: &str, field: &str, patterns: &[String]) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let joined = format!("^(?:{})$", patterns.join("|"));
    super::compile(job, field, &joined).map(Some)
}

impl Brancher {
    pub fn new(job: &str, branches: &[String], skip_branches: &[String]) -> Result<Self> {
        Ok(Self {
            branches: alternation(job, "branches", branches)?,
            skip_branches: alternation(job, "skip_branches", skip_branches)?,
        })
    }

    pub fn runs_against_all_branches(&self) -> bool {
        self.branches.is_none() && self.skip_branches.is_none()
    }

    pub fn should_run(&self, branch: &str) -> bool {
        if self.runs_against_all_branches() {
            return true;
        }
        if let Some(ref skip) = self.skip_branches
            && skip.is_match(branch)
        {
            return false;
        }
        self.branches.as_ref().is_none_or(|re| re.is_match(branch))
    }
}
