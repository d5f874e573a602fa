//! Error type shared by the filter engine, job loading, and the CLI.

/// Errors produced while building filters, evaluating presubmits, or loading input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An external collaborator (change provider, context resolver) failed.
    #[error("dependency failure: {0}")]
    Dependency(String),

    /// The eligibility check for one job failed.
    #[error("{job}: should run: {source}")]
    ShouldRun {
        job: String,
        #[source]
        source: Box<Error>,
    },

    /// A presubmit definition cannot be turned into a usable job.
    #[error("invalid presubmit {job}: {reason}")]
    InvalidJob { job: String, reason: String },

    /// The TOML configuration could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// The JSON request could not be parsed or the response serialized.
    #[error("invalid request: {0}")]
    Input(#[from] serde_json::Error),
}

impl Error {
    /// Build a dependency failure from any displayable cause.
    pub fn dependency(cause: impl std::fmt::Display) -> Self {
        Error::Dependency(cause.to_string())
    }

    /// Attach the job name to an eligibility failure.
    pub(crate) fn should_run(job: &str, source: Error) -> Self {
        Error::ShouldRun {
            job: job.to_string(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_run_message_names_the_job() {
        let err = Error::should_run("unit", Error::dependency("github: 502"));
        assert_eq!(
            err.to_string(),
            "unit: should run: dependency failure: github: 502"
        );
    }

    #[test]
    fn should_run_keeps_source() {
        let err = Error::should_run("lint", Error::dependency("timeout"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("dependency failure: timeout"));
    }
}
