//! Run the syntax pass and every rule against the targets.

use std::io::stdout;
use std::path::PathBuf;
use std::process;

use clap::Args;
use color_eyre::eyre::{Context, Result};
use tracing::instrument;

use fomash::driver::Driver;
use fomash::rewriter::{External, Mode};
use fomash::status;
use fomash::targets::{ExcludeSet, Targets};

use super::RuleArgs;

#[derive(Args, Clone, Debug)]
pub struct RunConfig {
    /// Write fixes to files instead of printing the diff and failing.
    #[arg(short, long, conflicts_with = "list")]
    pub write: bool,

    /// List failing files instead of printing the diff.
    #[arg(short, long)]
    pub list: bool,

    /// Continue past the first failure.
    #[arg(short = 'c', long)]
    pub carry_on: bool,

    /// Run all the rules, but against an empty Go file (useful for validating
    /// your rules).
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// From where to start the walk.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path to exclude, relative to root or absolute; can be specified multiple times
    /// [default: vendor, .git, build].
    #[arg(short = 'x', long = "exclude", value_name = "PATH")]
    pub excludes: Vec<PathBuf>,

    /// Binary to use (e.g. `goimports` or `gofumpt`).
    #[arg(long, default_value = External::DEFAULT_BINARY)]
    pub binary: String,

    /// Terminal width, used to shorten long rules in progress lines.
    #[arg(long, env = "COLUMNS", hide = true)]
    pub columns: Option<usize>,

    /// Files or directories to run against instead of walking the root.
    pub paths: Vec<PathBuf>,
}

impl RunConfig {
    /// The rewriter mode selected by `-w` and `-l`.
    pub fn mode(&self) -> Mode {
        if self.list {
            Mode::List
        } else if self.write {
            Mode::Write
        } else {
            Mode::Diff
        }
    }

    /// The files every invocation runs against.
    fn targets(&self) -> Result<Targets> {
        if self.dry_run {
            return Targets::scratch();
        }

        if !self.paths.is_empty() {
            return Ok(Targets::explicit(self.paths.clone()));
        }

        let excludes = if self.excludes.is_empty() {
            ExcludeSet::defaults(&self.root)?
        } else {
            ExcludeSet::new(&self.root, &self.excludes)?
        };
        Targets::walked(&self.root, &excludes).context("collect files")
    }
}

#[instrument]
pub fn main(rules: &RuleArgs, config: RunConfig) -> Result<()> {
    let rules = rules.cooked()?;
    let targets = config.targets()?;
    tracing::debug!(
        rules = rules.len(),
        targets = targets.paths().len(),
        scratch = targets.is_scratch(),
        "starting run"
    );

    let rewriter = External::new(&config.binary);
    let state = Driver::builder()
        .rewriter(&rewriter)
        .targets(targets.paths())
        .mode(config.mode())
        .carry_on(config.carry_on)
        .columns(config.columns.unwrap_or(status::DEFAULT_COLUMNS))
        .build()
        .run(&rules, &mut stdout().lock())?;

    // Exiting skips destructors, so remove the scratch file first.
    drop(targets);

    if state.failed() {
        status::despair();
        process::exit(1);
    }

    Ok(())
}
