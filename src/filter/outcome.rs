use serde::Serialize;

/// What a filter concluded about one presubmit.
///
/// `forced` tells the evaluator to skip path-based run conditions;
/// `default_behavior` is the answer to use when those conditions are
/// consulted but say nothing either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub matches: bool,
    pub forced: bool,
    pub default_behavior: bool,
}

impl FilterOutcome {
    pub const NO_MATCH: FilterOutcome = FilterOutcome {
        matches: false,
        forced: false,
        default_behavior: false,
    };

    pub fn matched(forced: bool, default_behavior: bool) -> Self {
        Self {
            matches: true,
            forced,
            default_behavior,
        }
    }
}
