//! Choosing the files every invocation runs against.
//!
//! Targets come from one of three places, in order of preference:
//! 1. A scratch file holding an empty package, for dry runs that only check
//!    that the rules parse.
//! 2. Paths given explicitly on the command line, used verbatim.
//! 3. A walk of the root directory, collecting Go sources.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{self, Path, PathBuf};

use color_eyre::{
    Section,
    eyre::{Context, Result, eyre},
};
use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

/// Extension of the files collected by the walk.
pub const SOURCE_EXTENSION: &str = "go";

/// Ceiling on the total length of the rewriter's arguments.
///
/// Obtained from `xargs --show-limits`; the real limit varies by system.
pub const ARGUMENT_LIMIT: usize = 2_000_000;

/// Contents of the dry-run scratch file.
pub const SCRATCH_SOURCE: &str = "package foo\n";

/// Paths skipped by the walk.
///
/// Entries are joined onto the walk root, so they may be given relative to it
/// or as absolute paths. Both entries and walked paths are compared in
/// absolute form, so a relative root such as `.` still matches absolute
/// entries. Excluded directories are pruned with everything below them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeSet(HashSet<PathBuf>);

impl ExcludeSet {
    /// Entries excluded when none are configured.
    pub const DEFAULT: [&str; 3] = ["vendor", ".git", "build"];

    /// Build the set for a walk starting at `root`.
    pub fn new(root: &Path, entries: impl IntoIterator<Item = impl AsRef<Path>>) -> Result<Self> {
        entries
            .into_iter()
            .map(|entry| {
                let entry = root.join(entry);
                path::absolute(&entry).with_context(|| format!("resolve exclude: {entry:?}"))
            })
            .collect::<Result<_>>()
            .map(Self)
    }

    /// Build the default set for a walk starting at `root`.
    pub fn defaults(root: &Path) -> Result<Self> {
        Self::new(root, Self::DEFAULT)
    }

    /// Whether the walk should skip `path`.
    pub fn contains(&self, path: &Path) -> bool {
        path::absolute(path).is_ok_and(|path| self.0.contains(&path))
    }
}

/// The files handed to every invocation.
///
/// Holds on to the dry-run scratch file, if any, so it is deleted when the
/// targets are dropped.
#[derive(Debug)]
pub struct Targets {
    paths: Vec<PathBuf>,
    scratch: Option<NamedTempFile>,
}

impl Targets {
    /// A single freshly created file containing an empty package.
    #[tracing::instrument]
    pub fn scratch() -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("fomash-")
            .suffix(".go")
            .tempfile()
            .context("create scratch file")?;
        file.write_all(SCRATCH_SOURCE.as_bytes())
            .and_then(|()| file.flush())
            .context("write scratch file")?;

        tracing::debug!(path = ?file.path(), "created scratch file");
        Ok(Self {
            paths: vec![file.path().to_path_buf()],
            scratch: Some(file),
        })
    }

    /// Paths given explicitly, used as-is.
    pub fn explicit(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            scratch: None,
        }
    }

    /// Go sources found by walking `root`.
    #[tracing::instrument]
    pub fn walked(root: &Path, excludes: &ExcludeSet) -> Result<Self> {
        let paths = walk(root, excludes)?;
        check_argument_length(&paths)?;
        Ok(Self::explicit(paths))
    }

    /// The paths to pass to the rewriter.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Whether these targets are the dry-run scratch file.
    pub fn is_scratch(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Walk `root` in file name order, collecting Go sources.
///
/// Hidden and excluded entries are skipped; hidden or excluded directories
/// are not descended into.
pub fn walk(root: &Path, excludes: &ExcludeSet) -> Result<Vec<PathBuf>> {
    let keep = |entry: &DirEntry| {
        entry.depth() == 0 || !(is_hidden(entry) || excludes.contains(entry.path()))
    };

    let mut files = vec![];
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(keep)
    {
        let entry = entry.with_context(|| format!("walk directory: {root:?}"))?;
        if entry.file_type().is_file()
            && entry.path().extension() == Some(OsStr::new(SOURCE_EXTENSION))
        {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(count = files.len(), ?root, "walked sources");
    Ok(files)
}

/// Make sure `paths` fit on a single rewriter command line.
///
/// Counts the bytes of every path plus one separator per argument, including
/// the three leading flags. Returns the estimated length.
pub fn check_argument_length(paths: &[PathBuf]) -> Result<usize> {
    let length = 6
        + paths
            .iter()
            .map(|path| path.as_os_str().len())
            .sum::<usize>()
        + 3
        + paths.len();

    if length > ARGUMENT_LIMIT {
        return Err(eyre!(
            "argument length {length} is dangerously close to the limit of {ARGUMENT_LIMIT}"
        ))
        .suggestion("Narrow the walk with `--root` or exclude directories with `-x`.");
    }

    Ok(length)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
