//! Recognition of the trigger commands that select broad filters.
//!
//! Every pattern runs in multi-line mode and must start at the beginning of
//! a line, so quoted or inline mentions of a command never trigger jobs.
//! `/test all` tolerates trailing text; `/retest`, `/retest-required` and
//! `/ok-to-test` must stand alone on their line apart from whitespace.
//! Whitespace means ASCII `[\t\n\f\r ]` only; NBSP, vertical tab and other
//! Unicode spaces do not count.

use std::sync::LazyLock;

use regex::Regex;

static TEST_ALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^/test all,?($|[\t\n\f\r ].*)").expect("valid /test all regex")
});

static RETEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^/retest[\t\n\f\r ]*$").expect("valid /retest regex"));

static RETEST_REQUIRED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^/retest-required[\t\n\f\r ]*$").expect("valid /retest-required regex")
});

static OK_TO_TEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^/ok-to-test[\t\n\f\r ]*$").expect("valid /ok-to-test regex")
});

/// `/test all`, optionally followed by a comma or further text.
pub fn is_test_all(body: &str) -> bool {
    TEST_ALL_RE.is_match(body)
}

/// `/retest` alone on a line.
pub fn is_retest(body: &str) -> bool {
    RETEST_RE.is_match(body)
}

/// `/retest-required` alone on a line.
pub fn is_retest_required(body: &str) -> bool {
    RETEST_REQUIRED_RE.is_match(body)
}

/// `/ok-to-test` alone on a line.
pub fn is_ok_to_test(body: &str) -> bool {
    OK_TO_TEST_RE.is_match(body)
}

/// Which broad trigger commands a comment body carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commands {
    pub test_all: bool,
    pub retest: bool,
    pub retest_required: bool,
    pub ok_to_test: bool,
}

impl Commands {
    pub fn scan(body: &str) -> Self {
        Self {
            test_all: is_test_all(body),
            retest: is_retest(body),
            retest_required: is_retest_required(body),
            ok_to_test: is_ok_to_test(body),
        }
    }

    /// Does the body ask for every automatically-run job?
    pub fn wants_test_all(&self, honor_ok_to_test: bool) -> bool {
        (honor_ok_to_test && self.ok_to_test) || self.test_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants() {
        assert!(is_test_all("/test all"));
        assert!(is_test_all("/test all, please"));
        assert!(is_test_all("/test all please"));
        assert!(is_test_all("lgtm\n/test all\n"));
        assert!(!is_test_all("/test allthethings"));
        assert!(!is_test_all("please /test all"));
        assert!(!is_test_all("/Test all"));
    }

    #[test]
    fn retest_must_stand_alone() {
        assert!(is_retest("/retest"));
        assert!(is_retest("/retest  \n"));
        assert!(is_retest("flaked again\n/retest"));
        assert!(!is_retest("/retest please"));
        assert!(!is_retest("> /retest"));
        assert!(!is_retest("/retest-required"));
    }

    #[test]
    fn retest_required_must_stand_alone() {
        assert!(is_retest_required("/retest-required"));
        assert!(is_retest_required("/retest-required\r\n"));
        assert!(!is_retest_required("/retest-required now"));
        assert!(!is_retest_required("/retest"));
    }

    #[test]
    fn ok_to_test_must_stand_alone() {
        assert!(is_ok_to_test("/ok-to-test"));
        assert!(!is_ok_to_test("/ok-to-test maybe"));
    }

    #[test]
    fn unicode_spaces_do_not_count() {
        assert!(!is_retest("/retest\u{a0}"));
        assert!(!is_retest("/retest\u{0b}"));
        assert!(!is_retest_required("/retest-required\u{2003}"));
        assert!(!is_ok_to_test("/ok-to-test\u{a0}"));
        assert!(!is_test_all("/test all\u{a0}please"));
        assert!(is_retest("/retest\t\x0c\r\n"));
        assert!(is_test_all("/test all\tplease"));
    }

    #[test]
    fn scan_collects_every_command() {
        let cmds = Commands::scan("/retest\n/retest-required\n/ok-to-test");
        assert!(cmds.retest);
        assert!(cmds.retest_required);
        assert!(cmds.ok_to_test);
        assert!(!cmds.test_all);
    }

    #[test]
    fn ok_to_test_only_counts_when_honored() {
        let cmds = Commands::scan("/ok-to-test");
        assert!(!cmds.wants_test_all(false));
        assert!(cmds.wants_test_all(true));
        assert!(Commands::scan("/test all").wants_test_all(false));
    }
}
