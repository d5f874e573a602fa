pub mod commands;

pub use commands::{Commands, is_ok_to_test, is_retest, is_retest_required, is_test_all};
