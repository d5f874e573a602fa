use std::fs::OpenOptions;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

/// Directory holding the log file.
const LOG_DIR: &str = "~/.local/share/presubmit-filter";

/// Path of the log file, with `~` expanded.
pub fn log_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(LOG_DIR).as_ref()).join("presubmit-filter.log")
}

/// Install the global logger: append to the log file, or stderr if it can't be opened.
/// Best-effort: a logger that fails to install never stops the command.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let path = log_path();
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, config, file);
        }
        Err(_) => {
            let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
        }
    }
}

/// Record which jobs a comment triggered.
pub fn log_decision(body: &str, triggered: &[String]) {
    log::info!(
        target: "decisions",
        "{}\t{}",
        one_line(body),
        if triggered.is_empty() {
            "-".to_string()
        } else {
            triggered.join(",")
        }
    );
}

/// Compact form of a comment body for a single log line.
fn one_line(body: &str) -> String {
    body.trim().replace('\n', "; ").chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_ends_with_file_name() {
        assert!(log_path().ends_with("presubmit-filter/presubmit-filter.log"));
    }

    #[test]
    fn one_line_joins_and_truncates() {
        assert_eq!(one_line("/retest\n/test unit\n"), "/retest; /test unit");
        assert_eq!(one_line(&"x".repeat(500)).len(), 200);
    }
}
