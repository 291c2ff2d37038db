//! Printing rules with `--show` and `--show-raw`.

use std::fs;

use indoc::indoc;
use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{run_plain, tree};

#[test]
fn test_show_cooked_rules() {
    let run = run_plain(&[
        "--show",
        "-m",
        "3",
        "-r",
        "  f(a…) -> g(a…)  ",
        "-r",
        "# skipped",
        "-r",
        "p -> q",
    ]);

    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    pretty_assert_eq!(
        run.stdout,
        indoc! {"
            f(a) -> g(a)
            f(a, b) -> g(a, b)
            f(a, b, c) -> g(a, b, c)
            p -> q
        "}
    );
}

#[test]
fn test_show_clamps_expansion() {
    let run = run_plain(&["--show", "-m", "99", "-r", "f(a…) -> g(a…)"]);

    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    pretty_assert_eq!(run.stdout.lines().count(), 25);
}

#[test]
fn test_show_raw_rules() {
    let dir = tree(&[]);
    let file = dir.path().join("rules.txt");
    fs::write(&file, "# header\nf(a…) -> g(a…)\n").expect("write rules");
    let file = file.to_string_lossy().into_owned();

    let run = run_plain(&["--show-raw", "-f", &file, "-r", "  p -> q"]);

    pretty_assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    pretty_assert_eq!(
        run.stdout,
        indoc! {"
            # header
            f(a…) -> g(a…)

              p -> q
        "}
    );
}

#[test]
fn test_show_bad_rule_fails() {
    let run = run_plain(&["--show", "-r", "f(a…) -> g(b…)"]);

    assert!(run.exit_code != 0, "expected failure");
    pretty_assert_eq!(run.stdout, "");
}

#[test]
fn test_show_missing_rule_file_fails() {
    let run = run_plain(&["--show", "-f", "/nonexistent/fomash/rules.txt"]);

    assert!(run.exit_code != 0, "expected failure");
    assert!(
        run.stderr.contains("rules.txt"),
        "error should name the file, got: {}",
        run.stderr
    );
}
