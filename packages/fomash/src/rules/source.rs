//! Raw rule loading.

use std::fs::read_to_string;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use tap::Tap;

/// Load raw rule lines.
///
/// The lines of `file` come first (split on `\n`, untouched), followed by each
/// of `inline` in order. Nothing is trimmed or filtered here; that is the
/// cook's job.
#[tracing::instrument]
pub fn load_raw(file: Option<&Path>, inline: &[String]) -> Result<Vec<String>> {
    let mut rules = match file {
        Some(path) => read_to_string(path)
            .with_context(|| format!("read rule file: {path:?}"))?
            .split('\n')
            .map(String::from)
            .collect::<Vec<_>>()
            .tap(|lines| tracing::debug!(count = lines.len(), ?path, "read rule file")),
        None => vec![],
    };

    rules.extend(inline.iter().cloned());
    Ok(rules)
}
