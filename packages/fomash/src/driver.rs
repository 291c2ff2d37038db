//! Sequencing rewriter invocations and aggregating their outcomes.
//!
//! A run is one syntax pass followed by one invocation per concrete rule, in
//! order. Invocations never overlap: a rule may depend on files having
//! already been rewritten by the rules before it.

use std::io::Write;
use std::path::PathBuf;

use bon::Builder;
use color_eyre::{
    Section,
    eyre::{Context, Result, eyre},
};
use derive_more::Display;

use crate::rewriter::{Mode, Outcome, Rewriter};
use crate::rules::ConcreteRule;
use crate::status::{self, Mark};

/// One invocation of the rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Pass {
    /// The baseline pass that only simplifies and formats.
    #[display("syntax pass")]
    Syntax,

    /// A pass applying a single rule.
    #[display("rule '{_0}'")]
    Rule(ConcreteRule),
}

impl From<Option<&ConcreteRule>> for Pass {
    fn from(rule: Option<&ConcreteRule>) -> Self {
        match rule {
            None => Pass::Syntax,
            Some(rule) => Pass::Rule(rule.clone()),
        }
    }
}

/// Passes that changed files during a run.
///
/// Only populated in carry-on mode; otherwise the first such pass ends the run
/// with an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    failures: Vec<Pass>,
}

impl RunState {
    /// Record a pass that changed files.
    pub fn record(&mut self, pass: Pass) {
        self.failures.push(pass);
    }

    /// Whether any pass changed files.
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Every pass that changed files, in the order they ran.
    pub fn failures(&self) -> &[Pass] {
        &self.failures
    }
}

/// Runs the syntax pass and then each rule against a fixed set of targets.
#[derive(Builder)]
pub struct Driver<'a, R: Rewriter> {
    /// Applies each pass.
    rewriter: &'a R,

    /// Files and directories handed to every invocation.
    targets: &'a [PathBuf],

    /// What the rewriter does with matches.
    #[builder(default)]
    mode: Mode,

    /// Keep going after a pass changes files, failing only at the end.
    #[builder(default)]
    carry_on: bool,

    /// Terminal width used to shorten rules in status lines.
    #[builder(default = status::DEFAULT_COLUMNS)]
    columns: usize,
}

impl<R: Rewriter> Driver<'_, R> {
    /// Run the syntax pass, then every rule in order.
    ///
    /// Rewriter output for passes that changed files is written to `out`.
    /// Returns an error on the first infrastructure failure, or on the first
    /// changing pass unless carrying on.
    #[tracing::instrument(skip_all, fields(rules = rules.len(), mode = %self.mode, carry_on = self.carry_on))]
    pub fn run(&self, rules: &[ConcreteRule], out: &mut impl Write) -> Result<RunState> {
        let mut state = RunState::default();

        self.invoke(None, &mut state, out)?;
        for rule in rules {
            self.invoke(Some(rule), &mut state, out)?;
        }

        tracing::debug!(failures = state.failures().len(), "run complete");
        Ok(state)
    }

    fn invoke(
        &self,
        rule: Option<&ConcreteRule>,
        state: &mut RunState,
        out: &mut impl Write,
    ) -> Result<()> {
        status::announce(self.rewriter.name(), rule, self.columns);

        let outcome = match self.rewriter.apply(rule, self.mode, self.targets) {
            Ok(outcome) => outcome,
            Err(error) => {
                status::finish(Mark::Error);
                return Err(error).with_context(|| format!("{} could not run", Pass::from(rule)));
            }
        };

        match outcome {
            Outcome::Unchanged => {
                status::finish(Mark::Unchanged);
                Ok(())
            }
            Outcome::Changed(output) => {
                status::finish(Mark::Changed);
                out.write_all(&output)
                    .and_then(|()| out.flush())
                    .context("write rewriter output")?;

                let pass = Pass::from(rule);
                if !self.carry_on {
                    return Err(eyre!("{pass} failed"))
                        .suggestion("Pass `-c` to carry on past failing rules.");
                }

                tracing::debug!(%pass, "recording failure");
                state.record(pass);
                Ok(())
            }
        }
    }
}
