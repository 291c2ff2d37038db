//! Ellipsised rule templates.
//!
//! Rewrite rules are often parameterized by an arity that the rewriter cannot
//! express in a single pattern. An ellipsised rule spells the family out once:
//!
//! ```text
//! errors.New(fmt.Sprintf(a…)) -> fmt.Errorf(a…)
//! ```
//!
//! and expands to one rule per arity, each matching a superset of the
//! variables of the previous one:
//!
//! ```text
//! errors.New(fmt.Sprintf(a)) -> fmt.Errorf(a)
//! errors.New(fmt.Sprintf(a, b)) -> fmt.Errorf(a, b)
//! errors.New(fmt.Sprintf(a, b, c)) -> fmt.Errorf(a, b, c)
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::{ConcreteRule, CookError, MaxExpansion};

/// The shape of an ellipsised rule; the marker is `…` (U+2026).
///
/// A non-letter-ending prefix, the anchor and the ellipsis, an infix holding
/// the rewrite arrow and ending in a non-letter, the anchor and the ellipsis
/// again, then the suffix. Anchors are captured as any letter or digit so that
/// out-of-range anchors are reported instead of silently passed through.
static ELLIPSISED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*\PL)([\pL\pN])…(.* -> .*\PL)([\pL\pN])…(.*)$").expect("valid regex")
});

/// A parsed ellipsised rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    prefix: String,
    anchor: char,
    infix: String,
    suffix: String,
}

impl Template {
    /// Parse a (trimmed) rule as a template.
    ///
    /// Returns `Ok(None)` when the rule is not ellipsised, and an error when it
    /// is ellipsised but its anchors are unusable.
    #[tracing::instrument(name = "Template::parse")]
    pub fn parse(rule: &str) -> Result<Option<Self>, CookError> {
        let Some(captures) = ELLIPSISED.captures(rule) else {
            return Ok(None);
        };

        let anchor_at = |group| {
            captures
                .get(group)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or_default()
        };
        let left = anchor_at(2);
        let right = anchor_at(4);

        if left != right {
            return Err(CookError::AnchorMismatch {
                rule: rule.to_string(),
                left,
                right,
            });
        }
        if !left.is_ascii_lowercase() {
            return Err(CookError::AnchorOutOfRange {
                rule: rule.to_string(),
                anchor: left,
            });
        }

        Ok(Some(Self {
            prefix: captures[1].to_string(),
            anchor: left,
            infix: captures[3].to_string(),
            suffix: captures[5].to_string(),
        }))
    }

    /// The character the template ranges over.
    pub fn anchor(&self) -> char {
        self.anchor
    }

    /// Expand the template into concrete rules, in ascending arity.
    ///
    /// The family stops at `max` variables or at `z`, whichever comes first;
    /// the range is exclusive of that bound, so a template anchored at `z`
    /// expands to nothing.
    pub fn expand(&self, max: MaxExpansion) -> Vec<ConcreteRule> {
        // Anchors are validated to be ASCII lowercase, and the limit keeps
        // `start + max` well inside `u8`.
        let start = self.anchor as u8;
        let end = start.saturating_add(max.get()).min(b'z');

        (start..end)
            .scan(String::new(), |pattern, var| {
                if !pattern.is_empty() {
                    pattern.push_str(", ");
                }
                pattern.push(char::from(var));
                Some(self.render(pattern))
            })
            .collect()
    }

    /// Substitute `pattern` for both anchor segments.
    fn render(&self, pattern: &str) -> ConcreteRule {
        let Self {
            prefix,
            infix,
            suffix,
            ..
        } = self;
        ConcreteRule::from(format!("{prefix}{pattern}{infix}{pattern}{suffix}"))
    }
}
