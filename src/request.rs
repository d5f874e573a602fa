//! JSON request/response types for the command-line entry point.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::eval::{
    self, AvailablePresubmits, CheckContexts, CheckStatus, ContextResolver, FilterReport,
};
use crate::job::{CachedChanges, ChangedFiles, Presubmit, PresubmitConfig};

/// One comment posted on a change, with what is known about that change.
#[derive(Debug, Default, Deserialize)]
pub struct TriggerRequest {
    /// The comment body.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub repo: String,
    /// Base branch of the change.
    #[serde(default)]
    pub branch: String,
    /// Files touched by the change, when the caller knows them.
    #[serde(default)]
    pub changed_files: Option<Vec<String>>,
    /// Status contexts already reported on the change.
    #[serde(default)]
    pub statuses: Option<Vec<CheckStatus>>,
    /// Jobs to consider; falls back to the configured list when empty.
    #[serde(default)]
    pub presubmits: Vec<PresubmitConfig>,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub to_trigger: Vec<String>,
    pub report: FilterReport,
}

struct RequestChanges<'a>(Option<&'a [String]>);

impl ChangedFiles for RequestChanges<'_> {
    fn changed_files(&self) -> Result<Vec<String>> {
        self.0
            .map(<[String]>::to_vec)
            .ok_or_else(|| Error::dependency("changed files were not provided"))
    }
}

struct RequestContexts<'a>(Option<&'a [CheckStatus]>);

impl ContextResolver for RequestContexts<'_> {
    fn contexts(&self) -> Result<CheckContexts> {
        self.0
            .map(CheckContexts::from_statuses)
            .ok_or_else(|| Error::dependency("check statuses were not provided"))
    }
}

impl TriggerRequest {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Validate the request's presubmits, or `configured` when it has none.
    pub fn jobs(&self, configured: &[PresubmitConfig]) -> Result<Vec<Presubmit>> {
        let source = if self.presubmits.is_empty() {
            configured
        } else {
            &self.presubmits
        };
        source.iter().map(Presubmit::from_config).collect()
    }

    fn changes(&self) -> CachedChanges<RequestChanges<'_>> {
        CachedChanges::new(RequestChanges(self.changed_files.as_deref()))
    }

    /// Which jobs this comment triggers.
    pub fn trigger(&self, honor_ok_to_test: bool, jobs: &[Presubmit]) -> Result<TriggerResponse> {
        let contexts = RequestContexts(self.statuses.as_deref());
        let filter = eval::presubmit_filter(honor_ok_to_test, &contexts, &self.body)?;
        let filtered = eval::filter_presubmits(&filter, &self.changes(), &self.branch, jobs)?;
        Ok(TriggerResponse {
            to_trigger: filtered.report.to_trigger.clone(),
            report: filtered.report,
        })
    }

    /// What could be run on this change, regardless of the comment.
    pub fn available(&self, jobs: &[Presubmit]) -> Result<AvailablePresubmits> {
        eval::available_presubmits(&self.changes(), &self.org, &self.repo, &self.branch, jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "body": "/retest",
        "org": "acme",
        "repo": "widgets",
        "branch": "main",
        "changed_files": ["docs/index.md"],
        "statuses": [
            {"context": "ci/unit", "state": "failure"},
            {"context": "ci/lint", "state": "success"}
        ],
        "presubmits": [
            {"name": "unit", "context": "ci/unit", "always_run": true},
            {"name": "lint", "context": "ci/lint", "always_run": true},
            {"name": "docs", "context": "ci/docs", "run_if_changed": "^docs/"}
        ]
    }"#;

    #[test]
    fn retest_from_json() {
        let request = TriggerRequest::from_json(REQUEST).unwrap();
        let jobs = request.jobs(&[]).unwrap();
        let response = request.trigger(false, &jobs).unwrap();
        assert_eq!(response.to_trigger, vec!["unit", "docs"]);
        assert_eq!(response.report.no_match_count, 1);
    }

    #[test]
    fn missing_statuses_fail_retest() {
        let request = TriggerRequest {
            body: "/retest".into(),
            branch: "main".into(),
            ..Default::default()
        };
        let err = request.trigger(false, &[]).unwrap_err();
        assert!(err.to_string().contains("check statuses were not provided"));
    }

    #[test]
    fn missing_changes_fail_scoped_jobs() {
        let request = TriggerRequest {
            body: "/test all".into(),
            branch: "main".into(),
            ..Default::default()
        };
        let jobs = vec![
            Presubmit::from_config(&PresubmitConfig {
                name: "docs".into(),
                run_if_changed: "^docs/".into(),
                ..Default::default()
            })
            .unwrap(),
        ];
        let err = request.trigger(false, &jobs).unwrap_err();
        assert!(err.to_string().starts_with("docs: should run:"));
    }

    #[test]
    fn falls_back_to_configured_jobs() {
        let request = TriggerRequest::default();
        let configured = vec![PresubmitConfig {
            name: "unit".into(),
            ..Default::default()
        }];
        let jobs = request.jobs(&configured).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].rerun_command, "/test unit");
    }

    #[test]
    fn available_from_json() {
        let request = TriggerRequest::from_json(REQUEST).unwrap();
        let jobs = request.jobs(&[]).unwrap();
        let available = request.available(&jobs).unwrap();
        assert_eq!(available.run_with_test_all.len(), 3);
        assert_eq!(available.required.len(), 3);
        assert!(available.optional.is_empty());
    }

    #[test]
    fn invalid_json_is_input_error() {
        assert!(matches!(
            TriggerRequest::from_json("{not json"),
            Err(Error::Input(_))
        ));
    }
}
