//! Command line entry points.

use std::path::PathBuf;

use clap::Args;
use color_eyre::{
    Section,
    eyre::{Context, Result},
};

use fomash::rules::{self, ConcreteRule, MaxExpansion};

pub mod run;
pub mod show;

/// Where rules come from and how they are cooked.
#[derive(Args, Clone, Debug)]
pub struct RuleArgs {
    /// File from which to read rules, one per line.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Add an individual rule; can be specified multiple times.
    #[arg(short = 'r', long = "rule", value_name = "RULE")]
    pub rules: Vec<String>,

    /// Expand ellipsised rules up to this many variables (at most 25).
    #[arg(short = 'm', long = "max", value_name = "N", default_value_t = MaxExpansion::DEFAULT)]
    pub max: MaxExpansion,
}

impl RuleArgs {
    /// The rules as written: lines of the rule file, then each `-r` rule.
    pub fn raw(&self) -> Result<Vec<String>> {
        rules::load_raw(self.file.as_deref(), &self.rules).context("load rules")
    }

    /// The rules as they will be run.
    pub fn cooked(&self) -> Result<Vec<ConcreteRule>> {
        rules::cook_all(self.raw()?, self.max).suggestion(
            "Ellipsised rules look like `f(a…) -> g(a…)`, with the same letter from a to z before both ellipses.",
        )
    }
}
