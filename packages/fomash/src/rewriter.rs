//! The external rewriter that actually applies rules.
//!
//! Everything impure about a run lives behind [`Rewriter`]: the driver only
//! ever sees an [`Outcome`] or an infrastructure error.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use color_eyre::{
    Section, SectionExt,
    eyre::{Context, Result, eyre},
};
use derive_more::Display;

use crate::rules::ConcreteRule;

/// What the rewriter does with files that a rule (or the syntax pass) changes.
///
/// Displays as the rewriter flag selecting the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum Mode {
    /// Print a diff of the changes.
    #[default]
    #[display("-d")]
    Diff,

    /// Rewrite the files in place.
    #[display("-w")]
    Write,

    /// List the files that would change.
    #[display("-l")]
    List,
}

/// Result of a rewriter invocation that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched; the files are already in the desired shape.
    Unchanged,

    /// Some files matched. Holds the diff or file listing the rewriter printed,
    /// byte for byte.
    Changed(Vec<u8>),
}

/// Something that can apply a rule to a set of files.
///
/// Errors are infrastructure failures (the rewriter could not run, or crashed)
/// and are always fatal. A rule that merely matches is [`Outcome::Changed`].
pub trait Rewriter {
    /// Name shown in status lines.
    fn name(&self) -> &str;

    /// Apply `rule` to `targets`, or run the bare syntax pass when `rule` is
    /// `None`.
    fn apply(
        &self,
        rule: Option<&ConcreteRule>,
        mode: Mode,
        targets: &[PathBuf],
    ) -> Result<Outcome>;
}

/// A rewriter backed by an external binary such as `gofmt`, `goimports`, or
/// `gofumpt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct External {
    binary: String,
}

impl External {
    /// The binary used when none is configured.
    pub const DEFAULT_BINARY: &str = "gofmt";

    /// Create a rewriter running `binary`, resolved through `PATH`.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the argument list for one invocation.
    ///
    /// The syntax pass runs `-s -s <mode> <targets>`; a rule pass runs
    /// `-r <rule> <mode> <targets>`, the rule taking the place of the doubled
    /// simplify flag.
    pub fn args(rule: Option<&ConcreteRule>, mode: Mode, targets: &[PathBuf]) -> Vec<OsString> {
        let lead = match rule {
            None => [OsString::from("-s"), OsString::from("-s")],
            Some(rule) => [OsString::from("-r"), OsString::from(rule.as_str())],
        };

        lead.into_iter()
            .chain([OsString::from(mode.to_string())])
            .chain(targets.iter().map(|path| path.clone().into_os_string()))
            .collect()
    }
}

impl Default for External {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BINARY)
    }
}

impl Rewriter for External {
    fn name(&self) -> &str {
        &self.binary
    }

    #[tracing::instrument(name = "External::apply", skip(targets), fields(targets = targets.len()))]
    fn apply(
        &self,
        rule: Option<&ConcreteRule>,
        mode: Mode,
        targets: &[PathBuf],
    ) -> Result<Outcome> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(Self::args(rule, mode, targets));
        tracing::debug!(?cmd, "running rewriter");

        let output = cmd
            .output()
            .with_context(|| format!("run rewriter `{}`", self.binary))?;

        let mut combined = output.stdout;
        combined.extend(output.stderr);

        if !output.status.success() {
            tracing::debug!(status = ?output.status, "rewriter failed");
            return Err(eyre!("rewriter `{}` failed: {}", self.binary, output.status))
                .with_section(|| {
                    String::from_utf8_lossy(&combined)
                        .into_owned()
                        .header("Output:")
                });
        }

        if combined.is_empty() {
            Ok(Outcome::Unchanged)
        } else {
            Ok(Outcome::Changed(combined))
        }
    }
}
