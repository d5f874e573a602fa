//! Presubmit job descriptors and their branch/path eligibility rules.
//!
//! A [`Presubmit`] is built once from a [`PresubmitConfig`] and is read-only
//! afterwards: every regex is compiled up front, so matching never fails.

pub mod brancher;
pub mod changes;

pub use brancher::Brancher;
pub use changes::{CachedChanges, ChangeMatcher, ChangedFiles, StaticChanges};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw presubmit definition as written in TOML config or a JSON request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PresubmitConfig {
    pub name: String,
    /// Status context reported to the host. Defaults to `name`.
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub always_run: bool,
    #[serde(default)]
    pub optional: bool,
    /// Regex matched against comment bodies.
    #[serde(default)]
    pub trigger: String,
    /// The command a human types to run this job on its own.
    #[serde(default)]
    pub rerun_command: String,
    #[serde(default)]
    pub run_if_changed: String,
    #[serde(default)]
    pub skip_if_only_changed: String,
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(default)]
    pub skip_branches: Vec<String>,
}

/// A validated presubmit job.
#[derive(Debug, Clone)]
pub struct Presubmit {
    pub name: String,
    pub context: String,
    pub rerun_command: String,
    /// Failure does not block merge.
    pub optional: bool,
    pub always_run: bool,
    trigger: Regex,
    brancher: Brancher,
    change_matcher: Option<ChangeMatcher>,
}

/// The trigger used when a job declares neither `trigger` nor `rerun_command`.
///
/// Only ASCII whitespace may follow the job name.
pub fn default_trigger_for(name: &str) -> String {
    format!(r"(?m)^/test( | .* ){},?($|[\t\n\f\r ].*)", regex::escape(name))
}

/// The rerun command paired with [`default_trigger_for`].
pub fn default_rerun_command_for(name: &str) -> String {
    format!("/test {name}")
}

/// Compile a regex from job config, naming the job and field on failure.
pub(crate) fn compile(job: &str, field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidJob {
        job: job.to_string(),
        reason: format!("{field}: {e}"),
    })
}

fn invalid(job: &str, reason: impl Into<String>) -> Error {
    Error::InvalidJob {
        job: job.to_string(),
        reason: reason.into(),
    }
}

impl Presubmit {
    /// Validate a config entry and compile its matchers.
    pub fn from_config(config: &PresubmitConfig) -> Result<Self> {
        let name = config.name.trim();
        if name.is_empty() {
            return Err(invalid("<unnamed>", "name must not be empty"));
        }

        let (trigger, rerun_command) =
            match (config.trigger.is_empty(), config.rerun_command.is_empty()) {
                (true, true) => (default_trigger_for(name), default_rerun_command_for(name)),
                (false, false) => (config.trigger.clone(), config.rerun_command.clone()),
                _ => {
                    return Err(invalid(
                        name,
                        "trigger and rerun_command must be set together",
                    ));
                }
            };
        let trigger = compile(name, "trigger", &trigger)?;
        if !trigger.is_match(&rerun_command) {
            return Err(invalid(
                name,
                format!("rerun_command {rerun_command:?} does not match trigger"),
            ));
        }

        let change_matcher =
            ChangeMatcher::from_config(name, &config.run_if_changed, &config.skip_if_only_changed)?;
        if config.always_run && change_matcher.is_some() {
            return Err(invalid(
                name,
                "always_run cannot be combined with run_if_changed or skip_if_only_changed",
            ));
        }

        let context = if config.context.is_empty() {
            name.to_string()
        } else {
            config.context.clone()
        };

        Ok(Self {
            name: name.to_string(),
            context,
            rerun_command,
            optional: config.optional,
            always_run: config.always_run,
            trigger,
            brancher: Brancher::new(name, &config.branches, &config.skip_branches)?,
            change_matcher,
        })
    }

    /// Does the comment body contain this job's trigger?
    pub fn trigger_matches(&self, body: &str) -> bool {
        self.trigger.is_match(body)
    }

    /// True when the job only ever runs on demand.
    pub fn needs_explicit_trigger(&self) -> bool {
        !self.always_run && self.change_matcher.is_none()
    }

    /// Could this job run at all against `branch`?
    pub fn could_run(&self, branch: &str) -> bool {
        self.brancher.should_run(branch)
    }

    /// Decide whether the job runs on `branch` for the given change set.
    ///
    /// Branch scope always applies. After that, `always_run` and `forced`
    /// short-circuit to true; a configured change matcher consults
    /// `changes`; anything else falls back to `default_behavior`.
    pub fn should_run(
        &self,
        branch: &str,
        changes: &dyn ChangedFiles,
        forced: bool,
        default_behavior: bool,
    ) -> Result<bool> {
        if !self.could_run(branch) {
            return Ok(false);
        }
        if self.always_run || forced {
            return Ok(true);
        }
        if let Some(ref matcher) = self.change_matcher {
            let files = changes.changed_files()?;
            return Ok(matcher.runs_against(&files));
        }
        Ok(default_behavior)
    }
}
