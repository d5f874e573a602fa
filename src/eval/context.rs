use std::cell::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reported state of one status context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Pending,
    Success,
    Failure,
    Error,
}

impl CheckState {
    pub fn is_failed(self) -> bool {
        matches!(self, CheckState::Failure | CheckState::Error)
    }
}

/// A status context as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckStatus {
    pub context: String,
    pub state: CheckState,
}

/// Contexts already reported on a change, used by the retest filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckContexts {
    /// Contexts whose last result was a failure or error.
    pub failed: HashSet<String>,
    /// Every context that has reported anything.
    pub all: HashSet<String>,
}

impl CheckContexts {
    pub fn new(
        failed: impl IntoIterator<Item = impl Into<String>>,
        all: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            failed: failed.into_iter().map(Into::into).collect(),
            all: all.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_statuses(statuses: &[CheckStatus]) -> Self {
        let mut contexts = Self::default();
        for status in statuses {
            if status.state.is_failed() {
                contexts.failed.insert(status.context.clone());
            }
            contexts.all.insert(status.context.clone());
        }
        contexts
    }

    pub fn has_failed(&self, context: &str) -> bool {
        self.failed.contains(context)
    }

    pub fn has_reported(&self, context: &str) -> bool {
        self.all.contains(context)
    }
}

/// Source of the failed/all context sets for a change.
pub trait ContextResolver {
    fn contexts(&self) -> Result<CheckContexts>;
}

impl<F> ContextResolver for F
where
    F: Fn() -> Result<CheckContexts>,
{
    fn contexts(&self) -> Result<CheckContexts> {
        self()
    }
}

/// Resolves contexts on first use and shares the result afterwards.
pub struct LazyContexts<'a> {
    resolver: &'a dyn ContextResolver,
    resolved: OnceCell<Arc<CheckContexts>>,
}

impl<'a> LazyContexts<'a> {
    pub fn new(resolver: &'a dyn ContextResolver) -> Self {
        Self {
            resolver,
            resolved: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<Arc<CheckContexts>> {
        if let Some(contexts) = self.resolved.get() {
            return Ok(Arc::clone(contexts));
        }
        let contexts = Arc::new(self.resolver.contexts()?);
        Ok(Arc::clone(self.resolved.get_or_init(|| contexts)))
    }
}
