//! Turning raw rule lines into concrete rules.

use itertools::Itertools;

use super::{ConcreteRule, CookError, MaxExpansion, Template};

/// Cook a single raw rule line.
///
/// - Blank lines and `#` comments produce no rules.
/// - Ellipsised rules expand into one rule per arity, in ascending order.
/// - Anything else passes through, trimmed, as a single rule.
#[tracing::instrument]
pub fn cook(raw: &str, max: MaxExpansion) -> Result<Vec<ConcreteRule>, CookError> {
    let rule = raw.trim();
    if rule.is_empty() || rule.starts_with('#') {
        return Ok(vec![]);
    }

    match Template::parse(rule)? {
        Some(template) => {
            let rules = template.expand(max);
            tracing::debug!(anchor = %template.anchor(), count = rules.len(), "expanded rule");
            Ok(rules)
        }
        None => Ok(vec![ConcreteRule::from(rule)]),
    }
}

/// Cook every raw rule, keeping source order.
///
/// Stops at the first bad rule; no rules are returned in that case, so a
/// partially valid rule set is never run.
pub fn cook_all<S: AsRef<str>>(
    raw: impl IntoIterator<Item = S>,
    max: MaxExpansion,
) -> Result<Vec<ConcreteRule>, CookError> {
    raw.into_iter()
        .map(|rule| cook(rule.as_ref(), max))
        .flatten_ok()
        .collect()
}
