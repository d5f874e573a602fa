pub mod context;
pub mod report;

pub use context::{CheckContexts, CheckState, CheckStatus, ContextResolver, LazyContexts};
pub use report::{AvailablePresubmits, FilterReport, Filtered};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::filter::{
    AggregateFilter, CommandFilter, Filter, RetestFilter, RetestRequiredFilter, TestAllFilter,
};
use crate::job::{ChangedFiles, Presubmit};
use crate::parse::Commands;

/// Run `filter` over `presubmits` and keep the jobs that should be triggered.
///
/// A matching job is kept only if its branch and path conditions agree,
/// taking the filter's `forced` and `default_behavior` into account. An
/// eligibility failure aborts the whole pass; no partial result is returned.
pub fn filter_presubmits<'a>(
    filter: &dyn Filter,
    changes: &dyn ChangedFiles,
    branch: &str,
    presubmits: &'a [Presubmit],
) -> Result<Filtered<'a>> {
    let mut to_trigger = Vec::new();
    let mut report = FilterReport {
        total_count: presubmits.len(),
        ..Default::default()
    };

    for presubmit in presubmits {
        let outcome = filter.evaluate(presubmit);
        if !outcome.matches {
            report.no_match_count += 1;
            continue;
        }
        let should_run = presubmit
            .should_run(branch, changes, outcome.forced, outcome.default_behavior)
            .map_err(|e| Error::should_run(&presubmit.name, e))?;
        if !should_run {
            report.should_not_run_count += 1;
            continue;
        }
        to_trigger.push(presubmit);
        report.to_trigger.push(presubmit.name.clone());
    }
    report.to_trigger_count = to_trigger.len();

    debug!(
        "Filtered complete: to-trigger={:?} total-count={} to-trigger-count={} no-match-count={} should-not-run-count={}",
        report.to_trigger,
        report.total_count,
        report.to_trigger_count,
        report.no_match_count,
        report.should_not_run_count,
    );
    Ok(Filtered { to_trigger, report })
}

/// Build the filter chain for one comment body.
///
/// Precedence, highest first: the job's own trigger, `/retest`,
/// `/retest-required`, then `/test all` (or `/ok-to-test` when honored).
/// `contexts` is only asked when a retest command is present, and at most once.
pub fn presubmit_filter(
    honor_ok_to_test: bool,
    contexts: &dyn ContextResolver,
    body: &str,
) -> Result<AggregateFilter> {
    let commands = Commands::scan(body);
    let lazy = LazyContexts::new(contexts);

    let mut filter = AggregateFilter::default();
    filter.push(CommandFilter::new(body));
    if commands.retest {
        info!("Using retest filter.");
        filter.push(RetestFilter::new(lazy.get()?));
    }
    if commands.retest_required {
        info!("Using retest-required filter.");
        filter.push(RetestRequiredFilter::new(lazy.get()?));
    }
    if commands.wants_test_all(honor_ok_to_test) {
        debug!("Using test-all filter.");
        filter.push(TestAllFilter);
    }
    Ok(filter)
}

/// List what can be run on a change: jobs `/test all` would start, and the
/// rerun commands of optional and required jobs that their own trigger would start.
pub fn available_presubmits(
    changes: &dyn ChangedFiles,
    org: &str,
    repo: &str,
    branch: &str,
    presubmits: &[Presubmit],
) -> Result<AvailablePresubmits> {
    debug!("Listing available presubmits for {org}/{repo}@{branch}");

    let run_with_test_all = filter_presubmits(&TestAllFilter, changes, branch, presubmits)?;

    let triggers: AggregateFilter = presubmits
        .iter()
        .map(|ps| Box::new(CommandFilter::new(ps.rerun_command.as_str())) as Box<dyn Filter>)
        .collect();
    let run_with_trigger = filter_presubmits(&triggers, changes, branch, presubmits)?;

    let mut available = AvailablePresubmits::default();
    available
        .run_with_test_all
        .extend(run_with_test_all.to_trigger.iter().map(|ps| ps.name.clone()));
    for ps in run_with_trigger.to_trigger {
        if ps.optional {
            available.optional.insert(ps.rerun_command.clone());
        } else {
            available.required.insert(ps.rerun_command.clone());
        }
    }
    Ok(available)
}
