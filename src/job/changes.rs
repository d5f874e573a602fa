//! Changed-file providers and path-based run conditions.

use std::cell::OnceCell;

use regex::Regex;

use crate::error::Result;

/// Source of the files touched by a change.
///
/// Only consulted for jobs with a path-based run condition, so an
/// implementation may defer an expensive lookup until it is called.
pub trait ChangedFiles {
    fn changed_files(&self) -> Result<Vec<String>>;
}

impl<F> ChangedFiles for F
where
    F: Fn() -> Result<Vec<String>>,
{
    fn changed_files(&self) -> Result<Vec<String>> {
        self()
    }
}

/// A change set that is already known.
#[derive(Debug, Clone, Default)]
pub struct StaticChanges {
    files: Vec<String>,
}

impl StaticChanges {
    pub fn new(files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl ChangedFiles for StaticChanges {
    fn changed_files(&self) -> Result<Vec<String>> {
        Ok(self.files.clone())
    }
}

/// Memoizes the first successful lookup of an inner provider.
///
/// Failures are not cached; the next call asks the inner provider again.
pub struct CachedChanges<P> {
    inner: P,
    files: OnceCell<Vec<String>>,
}

impl<P: ChangedFiles> CachedChanges<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            files: OnceCell::new(),
        }
    }
}

impl<P: ChangedFiles> ChangedFiles for CachedChanges<P> {
    fn changed_files(&self) -> Result<Vec<String>> {
        if let Some(files) = self.files.get() {
            return Ok(files.clone());
        }
        let fetched = self.inner.changed_files()?;
        Ok(self.files.get_or_init(|| fetched).clone())
    }
}

/// Path-based run condition of a presubmit.
#[derive(Debug, Clone)]
pub enum ChangeMatcher {
    /// Run when any changed file matches.
    RunIfChanged(Regex),
    /// Run unless every changed file matches.
    SkipIfOnlyChanged(Regex),
}

impl ChangeMatcher {
    /// Build the matcher for a job; `None` when neither pattern is set.
    pub fn from_config(
        job: &str,
        run_if_changed: &str,
        skip_if_only_changed: &str,
    ) -> Result<Option<Self>> {
        match (run_if_changed.is_empty(), skip_if_only_changed.is_empty()) {
            (true, true) => Ok(None),
            (false, true) => super::compile(job, "run_if_changed", run_if_changed)
                .map(|re| Some(ChangeMatcher::RunIfChanged(re))),
            (true, false) => super::compile(job, "skip_if_only_changed", skip_if_only_changed)
                .map(|re| Some(ChangeMatcher::SkipIfOnlyChanged(re))),
            (false, false) => Err(crate::error::Error::InvalidJob {
                job: job.to_string(),
                reason: "run_if_changed and skip_if_only_changed are mutually exclusive".into(),
            }),
        }
    }

    pub fn runs_against(&self, files: &[String]) -> bool {
        match self {
            ChangeMatcher::RunIfChanged(re) => files.iter().any(|f| re.is_match(f)),
            ChangeMatcher::SkipIfOnlyChanged(re) => files.iter().any(|f| !re.is_match(f)),
        }
    }
}
