//! presubmit-filter: decides which presubmit jobs a pull request comment triggers.
//!
//! A comment such as `/retest` or `/test unit` is turned into a chain of
//! [`filter::Filter`]s. The chain is evaluated against every configured
//! [`job::Presubmit`], and each matching job's branch and path conditions
//! decide whether it actually runs.
//!
//! # Architecture
//!
//! - **[`parse`]**: Recognition of `/test all`, `/retest`, `/retest-required`, `/ok-to-test`.
//! - **[`filter`]**: Filter trait, per-command filters, first-match-wins aggregation.
//! - **[`eval`]**: Evaluation loop, filter-chain builder, available-jobs summary, check contexts.
//! - **[`job`]**: Presubmit descriptors, branch scoping, changed-file providers.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: simplelog wiring and decision records.
//! - **[`request`]**: JSON request/response types used by the binary.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Crate error type.
pub mod error;
/// Evaluation engine: filtering loop, chain builder, summaries.
pub mod eval;
/// Filter trait and implementations.
pub mod filter;
/// Presubmit jobs and their eligibility rules.
pub mod job;
/// Log file setup and decision records.
pub mod logging;
/// Comment command recognition.
pub mod parse;
/// JSON request handling for the CLI.
pub mod request;

pub use error::{Error, Result};
pub use eval::{available_presubmits, filter_presubmits, presubmit_filter};

use eval::{CheckContexts, ContextResolver};
use job::{ChangedFiles, Presubmit};

/// Names of the jobs `body` triggers, in presubmit order.
///
/// Convenience wrapper over [`presubmit_filter`] and [`filter_presubmits`]
/// for callers that only need the job names.
pub fn triggered_jobs(
    body: &str,
    branch: &str,
    presubmits: &[Presubmit],
    changes: &dyn ChangedFiles,
    contexts: &dyn ContextResolver,
    honor_ok_to_test: bool,
) -> Result<Vec<String>> {
    let filter = presubmit_filter(honor_ok_to_test, contexts, body)?;
    let filtered = filter_presubmits(&filter, changes, branch, presubmits)?;
    Ok(filtered.report.to_trigger)
}

/// Context resolver for callers that already hold the failed/all sets.
pub fn known_contexts(contexts: CheckContexts) -> impl Fn() -> Result<CheckContexts> {
    move || Ok(contexts.clone())
}
