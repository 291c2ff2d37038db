//! CLI Smoke Tests

use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{run_fomash, run_plain};

#[test]
fn test_version() {
    let run = run_plain(&["--version"]);

    pretty_assert_eq!(run.exit_code, 0);
    assert!(run.stdout.starts_with("fomash "), "got: {}", run.stdout);
}

#[test]
fn test_help_lists_options() {
    let run = run_plain(&["--help"]);

    pretty_assert_eq!(run.exit_code, 0);
    for flag in ["--carry-on", "--dry-run", "--max", "--exclude", "--binary", "--show-raw"] {
        assert!(run.stdout.contains(flag), "help should mention {flag}, got: {}", run.stdout);
    }
}

#[test]
fn test_write_and_list_conflict() {
    let run = run_fomash(&["-w", "-l", "-n"]);

    pretty_assert_eq!(run.exit_code, 2, "clap usage errors exit 2");
    assert!(run.calls.is_empty(), "no invocation expected: {:?}", run.calls);
}

#[test]
fn test_invalid_max_rejected() {
    let run = run_fomash(&["-m", "lots", "-n"]);

    pretty_assert_eq!(run.exit_code, 2, "clap usage errors exit 2");
    assert!(run.calls.is_empty(), "no invocation expected: {:?}", run.calls);
}

#[test]
fn test_missing_binary_is_fatal() {
    let run = run_plain(&["--binary", "fomash-test-no-such-rewriter", "-n", "-c"]);

    assert!(run.exit_code != 0, "expected failure");
    assert!(
        run.stderr.contains("fomash-test-no-such-rewriter"),
        "error should name the binary, got: {}",
        run.stderr
    );
}
