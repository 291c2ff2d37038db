//! Progress lines printed to stderr while rules run.
//!
//! Each invocation prints `› gofmt -r '<rule>'`, then a mark once the
//! rewriter finishes. The mark is preceded by a carriage return so it lands
//! at the start of the line on a terminal.

use std::borrow::Cow;

use color_print::{ceprint, ceprintln};

use crate::rules::ConcreteRule;

/// Rules at most this long are never shortened.
pub const SHORT_RULE: usize = 40;

/// Terminal width assumed when none is known.
pub const DEFAULT_COLUMNS: usize = 80;

/// Room kept for the command name, quoting, and the mark.
const MARGIN: usize = 13;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Unchanged,
    Changed,
    Error,
}

/// Shorten `rule` to fit a terminal `columns` wide, ending it with `…` when cut.
pub fn shorten(rule: &str, columns: usize) -> Cow<'_, str> {
    let len = rule.chars().count();
    if len <= SHORT_RULE {
        return Cow::Borrowed(rule);
    }

    let width = columns.saturating_sub(MARGIN).max(SHORT_RULE);
    if len <= width {
        return Cow::Borrowed(rule);
    }

    let mut short = rule.chars().take(width - 1).collect::<String>();
    short.push('…');
    Cow::Owned(short)
}

/// Announce an invocation, without a trailing newline.
pub fn announce(binary: &str, rule: Option<&ConcreteRule>, columns: usize) {
    match rule {
        None => ceprint!("<dim>›</dim> {} -s", binary),
        Some(rule) => ceprint!(
            "<dim>›</dim> {} -r '{}'",
            binary,
            shorten(rule.as_str(), columns)
        ),
    }
}

/// Finish the line started by [`announce`].
pub fn finish(mark: Mark) {
    match mark {
        Mark::Unchanged => ceprintln!("\r<green>✓</green>"),
        Mark::Changed => ceprintln!("\r<red>×</red>"),
        Mark::Error => ceprintln!("\r<red>ℯ</red>"),
    }
}

/// Final line of a run that had failing rules.
pub fn despair() {
    ceprintln!("<bold><red>Crushing failure and despair.</red></bold>");
}
